// Output formatting — CSV result tables and terminal display.

pub mod csv;
pub mod terminal;
