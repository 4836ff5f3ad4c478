//! Generic CRUD over the compliance registers: requirements, findings,
//! knowledge-base articles and risks.

pub mod entity;
pub mod service;

pub use entity::RegisterEntity;
pub use service::RegisterService;
