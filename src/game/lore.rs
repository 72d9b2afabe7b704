// src/game/lore.rs

//! Static text of the game: title card, story and universe descriptions.

/// Block-letter title card.
pub const TITLE: &str = r"
       ▄█    █▄    ███    █▄  ███▄▄▄▄       ███              ███        ▄█    █▄       ▄████████
      ███    ███   ███    ███ ███▀▀▀██▄ ▀█████████▄      ▀█████████▄   ███    ███     ███    ███
      ███    ███   ███    ███ ███   ███    ▀███▀▀██         ▀███▀▀██   ███    ███     ███    █▀
     ▄███▄▄▄▄███▄▄ ███    ███ ███   ███     ███   ▀          ███   ▀  ▄███▄▄▄▄███▄▄  ▄███▄▄▄
    ▀▀███▀▀▀▀███▀  ███    ███ ███   ███     ███              ███     ▀▀███▀▀▀▀███▀  ▀▀███▀▀▀
      ███    ███   ███    ███ ███   ███     ███              ███       ███    ███     ███    █▄
      ███    ███   ███    ███ ███   ███     ███              ███       ███    ███     ███    ███
      ███    █▀    ████████▀   ▀█   █▀     ▄████▀           ▄████▀     ███    █▀      ██████████

    ████████▄   ███    █▄     ▄████████ ███▄▄▄▄       ███        ▄███████▄ ███    █▄     ▄████████
    ███    ███  ███    ███   ███    ███ ███▀▀▀██▄ ▀█████████▄   ███    ███ ███    ███   ███    ███
    ███    ███  ███    ███   ███    ███ ███   ███    ▀███▀▀██   ███    ███ ███    ███   ███    █▀
    ███    ███  ███    ███   ███    ███ ███   ███     ███   ▀   ███    ███ ███    ███   ███
    ███    ███  ███    ███ ▀███████████ ███   ███     ███     ▀█████████▀  ███    ███ ▀███████████
    ███    ███  ███    ███   ███    ███ ███   ███     ███       ███        ███    ███          ███
    ███  ▀ ███  ███    ███   ███    ███ ███   ███     ███       ███        ███    ███    ▄█    ███
     ▀██████▀▄█ ████████▀    ███    █▀   ▀█   █▀     ▄████▀    ▄████▀      ████████▀   ▄████████▀


                             AKA 'Running out of Hilbert space'
                      The 1st Ludum Dare game to run on a quantum computer
";

/// Story pages, each shown until the player presses enter.
pub const INTRO: [&str; 13] = [
    "Press enter to continue...",
    "In the beginning, a quantum computer created the multiverse...",
    "It was called the 'Quantum Production of Universes System', or 'Quantpus'...",
    "Though it has lain dormant for eons, it has suddenly started to malfunction...",
    "It is running the universe creation program backwards, causing the multiverse to collapse...",
    "Your job is to find and fix it, before it is too late...",
    "Use portals to move between universes, but be careful...",
    "If you enter a universe with less than 0.5% strength, you might cease to exist...",
    "There will become increasingly more of these as the multiverse collapses around you...",
    "And beware of malfunctioning portals, which would also lead to your annihilation...",
    "But if you find the universe where the quantpus is hidden, everything will be fine...",
    "The quantpus' universe will typically have a high strength, and will get stronger as everything collapses into it...",
    "That's the only clue we have as to where it is, so good luck!...",
];

const DESCRIBED_BITS: usize = 5;

/// Descriptions of the 32 five-bit universes, indexed by their binary value.
const DESCRIPTIONS: [&str; 32] = [
    "Your current universe has subspace and warp fields and Jean-Luc Picard.",
    "Your current universe is the dream of the Wind Fish.",
    "In your current universe, all emergency services are staffed by anthropomorphic dogs.",
    "Your current universe is host to an eternal war between butterflies and moths.",
    "In your current universe, 'Hello Quantum' was the top mobile game of 2018.",
    "In your current universe, the ever changing nature of the Klingons makes complete sense.",
    "Your current universe was messed up by an idiot speedster who keeps messing things up.",
    "Your current universe is one where Ganondorf gets forever stuck in the Water Temple.",
    "Your current universe has a weird vibe.",
    "Your current universe is our universe! It has the best cosmic microwave background in the multiverse!",
    "Your current universe is the only one where QISKit is not the best way to program quantum computers.",
    "Your current universe is the crossover universe for Marvel, DC and the Beano.",
    "Your current universe has a faint but noticeable smell of cheese.",
    "Your current universe is the one where musicals happen.",
    "Your current universe defies explanation.",
    "Your current universe has the weird kind of physics you often get in sci-fi.",
    "Your current universe is the only one where my kids go to bed at a reasonable hour.",
    "Your current universe is the one where genocidal plumbers gain royal favour.",
    "Your current universe is one that my parents wouldn't let me go to.",
    "Your current universe is the one where the 'Superman's Girl Friend, Lois Lane' comics were set.",
    "Your current universe is not on any maps, and seems to be full of dragons.",
    "In your current universe, Sega still makes consoles.",
    "Your current universe is cooler than you'll ever be.",
    "Your current universe is in need of a proper tidy.",
    "In your current universe, the Golden Gate Bridge is a nice shade of azure.",
    "Your current universe is one where Hylians evolve into fluffy pink rabbits.",
    "Your current universe is where giant reptiles prefer karting to kidnapping.",
    "Your current universe has Luigi as player one. It is better in every way.",
    "Your current universe is just a spare. It's where all the other universes keep their clutter.",
    "In your current universe, Monty Python's flying circus doesn't seem at all absurd.",
    "Your current universe is one where you didn't say that stupid thing.",
    "Your current universe has advanced technology and space wizards, but everyone still fights with swords for some reason.",
];

/// Flavour text for a universe; universes other than the 32 five-bit ones
/// are only named.
pub fn universe_description(universe: &str) -> String {
    if universe.len() == DESCRIBED_BITS {
        if let Ok(index) = usize::from_str_radix(universe, 2) {
            return DESCRIPTIONS[index].to_string();
        }
    }
    format!("Your current universe is universe {}.", universe)
}
