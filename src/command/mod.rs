mod history;
mod operation;

pub use history::OperationHistory;
pub use operation::Operation;
