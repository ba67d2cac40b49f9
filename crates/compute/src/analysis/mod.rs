pub mod abundance;
pub mod temporal;
