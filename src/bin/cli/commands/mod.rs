pub mod card;
pub mod deck;
pub mod practice;
pub mod profile;
