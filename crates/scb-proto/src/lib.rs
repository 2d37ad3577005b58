//! Wire contract for the external sketch-core daemon.
//!
//! The message structs and clients in here are hand-maintained `prost`
//! definitions mirroring the daemon's `scb.commands.v1` package, so the
//! workspace builds without a `protoc` toolchain. Field numbers and
//! streaming cardinality must stay in lockstep with the daemon binary.

pub mod scb {
    pub mod commands {
        pub mod v1;
    }
}
