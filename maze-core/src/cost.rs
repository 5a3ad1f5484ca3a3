//! The step cost model: pure functions, no grid access.

use maze_common::Direction;

/// The two user-configured weights from the input file header.
#[derive(Debug, Clone, Copy)]
pub struct Penalties {
    pub bend_penalty: u32,
    pub via_penalty: u32,
}

/// Base cost of the non-preferred direction on either layer.
const BASE_NON_PREFERRED: u32 = 3;
/// Base cost of the preferred direction on either layer.
const BASE_PREFERRED: u32 = 1;

/// One step of a path: either a via, or a same-layer move in `Direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Via,
    OnLayer(Direction),
}

/// Layer 0 prefers column-parallel travel (`δrow=0`); layer 1 prefers
/// row-parallel travel (`δcolumn=0`). Fixed convention, not configurable.
fn is_preferred(from_layer: u8, dir: Direction) -> bool {
    let column_parallel = dir.is_column_parallel();
    if from_layer == 0 {
        column_parallel
    } else {
        !column_parallel
    }
}

/// Cost of taking `step` from `from_layer`, given the direction of the
/// previous same-layer step (`None` at the source, or right after a
/// via — a via resets directional history, so the first on-layer step
/// following one is never charged a bend penalty).
pub fn step_cost(penalties: &Penalties, from_layer: u8, prev_dir: Option<Direction>, step: Step) -> u32 {
    match step {
        Step::Via => penalties.via_penalty,
        Step::OnLayer(dir) => {
            let base = if is_preferred(from_layer, dir) {
                BASE_PREFERRED
            } else {
                BASE_NON_PREFERRED
            };
            let bend = match prev_dir {
                Some(prev) if prev != dir => penalties.bend_penalty,
                _ => 0,
            };
            base + bend
        }
    }
}
