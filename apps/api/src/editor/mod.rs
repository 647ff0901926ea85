// Caret-precise marker editor.
//
// Document (segment buffer, logical char offsets) → caret resolution through an
// injected CoordinateResolver → marker insertion → raw/clean export. Every
// Document operation returns a new value; the session swaps it in under its lock.

pub mod caret;
pub mod document;
pub mod export;
pub mod fields;
pub mod handlers;
pub mod markers;
pub mod session;
pub mod store;
