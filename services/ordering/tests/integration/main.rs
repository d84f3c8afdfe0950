mod catalog_test;
mod helpers;
mod roles_test;
mod users_test;
mod uow_test;
