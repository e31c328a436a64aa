pub mod config;
pub mod db_update;
pub mod install;
pub mod make_update;
pub mod status;
