pub mod db;
pub mod uow;
