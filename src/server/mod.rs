pub mod router;
pub mod routes;

pub use router::{VoterState, voter_router};
