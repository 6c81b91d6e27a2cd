//! Rotation group tables for the 3D Peano-Hilbert curve
//!
//! The curve is described by the 24 proper rotations of a cube. Each state
//! fixes the order in which the eight child octants are visited, and visiting
//! an octant moves the walk to a new state for the next, finer level.
//! All tables are compile-time constants and can be shared freely.

/// Number of cube orientations (proper rotations of a cube)
pub const NUM_STATES: usize = 24;

/// Number of child cells per octree level
pub const NUM_OCTANTS: usize = 8;

/// `QUADRANTS[state][bitx][bity][bitz]` is the position of that octant along
/// the curve for the given orientation state.
pub const QUADRANTS: [[[[u8; 2]; 2]; 2]; NUM_STATES] = [
    // rotx = 0, roty = 0..3
    [[[0, 7], [1, 6]], [[3, 4], [2, 5]]],
    [[[7, 4], [6, 5]], [[0, 3], [1, 2]]],
    [[[4, 3], [5, 2]], [[7, 0], [6, 1]]],
    [[[3, 0], [2, 1]], [[4, 7], [5, 6]]],
    // rotx = 1, roty = 0..3
    [[[1, 0], [6, 7]], [[2, 3], [5, 4]]],
    [[[0, 3], [7, 4]], [[1, 2], [6, 5]]],
    [[[3, 2], [4, 5]], [[0, 1], [7, 6]]],
    [[[2, 1], [5, 6]], [[3, 0], [4, 7]]],
    // rotx = 2, roty = 0..3
    [[[6, 1], [7, 0]], [[5, 2], [4, 3]]],
    [[[1, 2], [0, 3]], [[6, 5], [7, 4]]],
    [[[2, 5], [3, 4]], [[1, 6], [0, 7]]],
    [[[5, 6], [4, 7]], [[2, 1], [3, 0]]],
    // rotx = 3, roty = 0..3
    [[[7, 6], [0, 1]], [[4, 5], [3, 2]]],
    [[[6, 5], [1, 2]], [[7, 4], [0, 3]]],
    [[[5, 4], [2, 3]], [[6, 7], [1, 0]]],
    [[[4, 7], [3, 0]], [[5, 6], [2, 1]]],
    // rotx = 4, roty = 0..3
    [[[6, 7], [5, 4]], [[1, 0], [2, 3]]],
    [[[7, 0], [4, 3]], [[6, 1], [5, 2]]],
    [[[0, 1], [3, 2]], [[7, 6], [4, 5]]],
    [[[1, 6], [2, 5]], [[0, 7], [3, 4]]],
    // rotx = 5, roty = 0..3
    [[[2, 3], [1, 0]], [[5, 4], [6, 7]]],
    [[[3, 4], [0, 7]], [[2, 5], [1, 6]]],
    [[[4, 5], [7, 6]], [[3, 2], [0, 1]]],
    [[[5, 2], [6, 1]], [[4, 3], [7, 0]]],
];

/// State reached from each state by one quarter-turn about the x axis
pub const ROTX_MAP: [u8; NUM_STATES] = [
    4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 17, 18, 19, 16, 23, 20, 21, 22,
];

/// State reached from each state by one quarter-turn about the y axis
pub const ROTY_MAP: [u8; NUM_STATES] = [
    1, 2, 3, 0, 16, 17, 18, 19, 11, 8, 9, 10, 22, 23, 20, 21, 14, 15, 12, 13, 4, 5, 6, 7,
];

/// Quarter-turns about x applied after visiting each octant
pub const ROTX: [u8; NUM_OCTANTS] = [3, 0, 0, 2, 2, 0, 0, 1];

/// Quarter-turns about y applied after visiting each octant
pub const ROTY: [u8; NUM_OCTANTS] = [0, 1, 1, 2, 2, 3, 3, 0];

/// Sense flip contributed by each octant (-1 reverses the numbering below it)
pub const SENSE: [i8; NUM_OCTANTS] = [-1, -1, -1, 1, 1, -1, -1, -1];

/// `STATE_TRANSITIONS[state][octant]` is the state after visiting `octant`.
///
/// Equivalent to applying `ROTX[octant]` x-turns then `ROTY[octant]` y-turns,
/// folded into one lookup.
pub const STATE_TRANSITIONS: [[u8; NUM_OCTANTS]; NUM_STATES] = build_transitions();

const fn compose_turns(state: u8, octant: usize) -> u8 {
    let mut rotation = state;
    let mut turns = ROTX[octant];
    while turns > 0 {
        rotation = ROTX_MAP[rotation as usize];
        turns -= 1;
    }
    let mut turns = ROTY[octant];
    while turns > 0 {
        rotation = ROTY_MAP[rotation as usize];
        turns -= 1;
    }
    rotation
}

const fn build_transitions() -> [[u8; NUM_OCTANTS]; NUM_STATES] {
    let mut table = [[0u8; NUM_OCTANTS]; NUM_STATES];
    let mut state = 0;
    while state < NUM_STATES {
        let mut octant = 0;
        while octant < NUM_OCTANTS {
            table[state][octant] = compose_turns(state as u8, octant);
            octant += 1;
        }
        state += 1;
    }
    table
}

/// Curve position of the child selected by (`bitx`, `bity`, `bitz`) in `state`
#[inline(always)]
pub fn octant(state: u8, bitx: u32, bity: u32, bitz: u32) -> u8 {
    QUADRANTS[state as usize][bitx as usize][bity as usize][bitz as usize]
}

/// Orientation state for the next level after visiting `octant`
#[inline(always)]
pub fn next_state(state: u8, octant: u8) -> u8 {
    STATE_TRANSITIONS[state as usize][octant as usize]
}

/// Sense multiplier contributed by `octant`
#[inline(always)]
pub fn sense_flip(octant: u8) -> i8 {
    SENSE[octant as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_state_is_a_permutation_of_octants() {
        for state in 0..NUM_STATES {
            let mut seen = [false; NUM_OCTANTS];
            for bx in 0..2 {
                for by in 0..2 {
                    for bz in 0..2 {
                        let o = QUADRANTS[state][bx][by][bz] as usize;
                        assert!(!seen[o], "state {} repeats octant {}", state, o);
                        seen[o] = true;
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation_maps_are_permutations() {
        for map in [ROTX_MAP, ROTY_MAP] {
            let mut seen = [false; NUM_STATES];
            for &s in map.iter() {
                assert!(!seen[s as usize]);
                seen[s as usize] = true;
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for state in 0..NUM_STATES as u8 {
            let mut x = state;
            let mut y = state;
            for _ in 0..4 {
                x = ROTX_MAP[x as usize];
                y = ROTY_MAP[y as usize];
            }
            assert_eq!(x, state);
            assert_eq!(y, state);
        }
    }

    #[test]
    fn test_transition_table_matches_turn_composition() {
        // Spot checks against the turn-by-turn walk
        assert_eq!(STATE_TRANSITIONS[0], [12, 1, 1, 10, 10, 3, 3, 4]);
        assert_eq!(STATE_TRANSITIONS[23], [20, 7, 7, 17, 17, 13, 13, 22]);

        for state in 0..NUM_STATES {
            for o in 0..NUM_OCTANTS {
                let mut r = state as u8;
                for _ in 0..ROTX[o] {
                    r = ROTX_MAP[r as usize];
                }
                for _ in 0..ROTY[o] {
                    r = ROTY_MAP[r as usize];
                }
                assert_eq!(next_state(state as u8, o as u8), r);
            }
        }
    }
}
