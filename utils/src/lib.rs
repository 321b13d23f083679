pub mod surf_logging;
pub mod uri;
