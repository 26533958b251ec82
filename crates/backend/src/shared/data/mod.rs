pub mod db;
pub mod kv_storage;
