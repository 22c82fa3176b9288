//! Bonus tier table handlers.

mod get_bonus_parameters;
mod update_bonus_parameters;

pub(crate) use get_bonus_parameters::load_bonus_parameters;
pub use get_bonus_parameters::{GetBonusParametersHandler, GetBonusParametersQuery};
pub use update_bonus_parameters::{
    UpdateBonusParametersHandler, UpdateKpiRulesCommand, UpdatePerformanceRulesCommand,
};
