//! lib target
//!
//! The crate provides two loosely coupled subsystems sharing a dense matrix
//! representation :
//! - random graph samplers (Erdos-Renyi, stochastic block model, structured
//!   independent edge model, random dot product graph, correlated pairs) in module [simul]
//! - multiple adjacency spectral embedding of a collection of graphs on a common
//!   vertex set in module [embed]
//!
//! All the sampling routines take the random generator as an explicit argument,
//! there is no global random state in the crate.


use env_logger::{Builder};

#[macro_use]
extern crate  lazy_static;

lazy_static! {
    static ref LOG: u64 = {
        let res = init_log();
        res
    };
}

// install a logger facility
fn init_log() -> u64 {
    Builder::from_default_env().init();
    println!("\n ************** initializing logger *****************\n");
    return 1;
}

pub mod simul;

pub mod embed;

pub mod tools;

pub mod prelude;
