// Application layer: rendering of divination outcomes for the CLI.

pub mod report;
