pub mod drone_zone;
