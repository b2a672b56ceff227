/* src/render/rust/src/lib.rs */

//! Draws the shell around a [`Repeater`](repeater_engine::Repeater): group
//! regions, add and remove affordances, and the stylesheet block. Affordance
//! activation comes back in as an [`Action`].

mod action;
mod shell;
mod styles;

pub use action::{dispatch, Action, ActionError};
pub use shell::{render_shell, PART_ADD_BUTTON, PART_GROUP, PART_GROUPS, PART_REMOVE_BUTTON};
pub use styles::{adopted_styles, reset_adopted_styles, AdoptedStyles, BASE_STYLES};
