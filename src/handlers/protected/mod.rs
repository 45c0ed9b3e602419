// handlers/protected/mod.rs - Routes behind the bearer-token gate

pub mod ads;
