//! Comment-command interpreter for the Derek repository bot.
//!
//! Turns an issue or pull-request comment body into a typed `CommandAction`,
//! checks whether the requested mutation would change anything, classifies
//! multi-label requests, and maps the result onto the collaborator contract
//! that performs the actual repository mutation.
//!
//! Everything in this crate is pure and safe to call concurrently. The trigger
//! registry and grammar table are built once from `CommandConfig` and never
//! mutated afterwards.

pub mod command_config;
pub mod command_dispatch;
pub mod command_feedback;
pub mod command_grammar;
pub mod command_guard;
pub mod command_trigger;
pub mod command_value;
pub mod issue_snapshot;
pub mod label_classifier;
pub mod repo_policy;

pub use command_config::*;
pub use command_dispatch::*;
pub use command_feedback::*;
pub use command_grammar::*;
pub use command_guard::*;
pub use command_trigger::*;
pub use command_value::*;
pub use issue_snapshot::*;
pub use label_classifier::*;
pub use repo_policy::*;
