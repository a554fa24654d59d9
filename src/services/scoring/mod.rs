pub mod ledger;
pub mod voice;
