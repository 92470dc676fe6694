use crate::scene::Deck;
use std::error::Error;

pub fn render(deck: &Deck) -> Result<String, Box<dyn Error>> {
    Ok(deck.to_json_pretty()?)
}
