// Job/candidate compatibility analysis.
// The scorer is pure and synchronous; handlers only gather the two skill lists.

pub mod handlers;
pub mod scorer;
