use super::*;

mod find_free_allocation;
mod find_or_create_user;
mod provision_server;
