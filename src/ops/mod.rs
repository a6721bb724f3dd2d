pub mod line_ops;
pub mod undo;
pub mod view;
