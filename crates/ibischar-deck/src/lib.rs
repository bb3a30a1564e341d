//! SPICE deck synthesis (spec §4.2): turns one Simulation Plan Item into a
//! complete, dialect-specific deck text ready for the simulator driver.

mod dialect;
mod error;
mod render;

pub use dialect::{dialect_for, SimulatorDialect};
pub use error::{DeckError, DeckResult};
pub use render::{curve_label, render_deck};
