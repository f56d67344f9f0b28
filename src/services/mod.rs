pub mod auth;
pub mod path_filter;
pub mod request_path;
pub mod route_table;
pub mod upstream;
