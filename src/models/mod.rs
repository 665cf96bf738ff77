pub mod annotation;
pub mod record;
pub mod utterance;

pub use annotation::*;
pub use record::*;
pub use utterance::*;
