//! Compliance register entities: requirements, findings, knowledge-base
//! articles, and the risk register.

pub mod finding;
pub mod knowledge;
pub mod requirement;
pub mod risk;

pub use finding::{Finding, FindingSeverity, FindingStatus};
pub use knowledge::KnowledgeArticle;
pub use requirement::{Requirement, RequirementStatus};
pub use risk::{Risk, RiskStatus};
