mod model;
mod repository;

pub use model::BudgetAllocationDB;
pub use repository::BudgetRepository;
