//! The French beginner course shipped with the seeder.

use crate::model::{Catalog, LessonDef, UnitDef, VocabItem};

fn word(english: &str, french: &str, image: &str, audio: &str) -> VocabItem {
    VocabItem::new(english, french)
        .with_image(format!("/{image}.svg"))
        .with_audio(format!("/{audio}.mp3"))
}

/// Build the French course: three units of five lessons, four words each.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn french_course() -> Catalog {
    Catalog::new(
        "French",
        "/fr.svg",
        "Comprehensive French beginner course",
        vec![
            UnitDef::new(
                "Fundamentals",
                "Greetings, numbers, colors and basic verbs",
                1,
                vec![
                    LessonDef::new(
                        "Greetings",
                        vec![
                            word("the man", "l'homme", "man", "fr_man"),
                            word("the woman", "la femme", "woman", "fr_woman"),
                            word("the boy", "le garçon", "boy", "fr_boy"),
                            word("the girl", "la fille", "girl", "fr_girl"),
                        ],
                    ),
                    LessonDef::new(
                        "Numbers 1-4",
                        vec![
                            word("one", "un", "one", "fr_one"),
                            word("two", "deux", "two", "fr_two"),
                            word("three", "trois", "three", "fr_three"),
                            word("four", "quatre", "four", "fr_four"),
                        ],
                    ),
                    LessonDef::new(
                        "Colors",
                        vec![
                            word("red", "rouge", "red", "fr_red"),
                            word("blue", "bleu", "blue", "fr_blue"),
                            word("green", "vert", "green", "fr_green"),
                            word("yellow", "jaune", "yellow", "fr_yellow"),
                        ],
                    ),
                    LessonDef::new(
                        "Common Phrases",
                        vec![
                            word("hello", "bonjour", "hello", "fr_bonjour"),
                            word("goodbye", "au revoir", "goodbye", "fr_aurevoir"),
                            word("please", "s'il vous plaît", "please", "fr_svp"),
                            word("thank you", "merci", "thankyou", "fr_merci"),
                        ],
                    ),
                    LessonDef::new(
                        "Basic Verbs",
                        vec![
                            word("to eat", "manger", "eat", "fr_manger"),
                            word("to drink", "boire", "drink", "fr_boire"),
                            word("to go", "aller", "go", "fr_aller"),
                            word("to be", "être", "be", "fr_etre"),
                        ],
                    ),
                ],
            ),
            UnitDef::new(
                "Food & Dining",
                "Food, drinks, ordering and taste",
                2,
                vec![
                    LessonDef::new(
                        "Food Items",
                        vec![
                            word("bread", "le pain", "bread", "fr_bread"),
                            word("cheese", "le fromage", "cheese", "fr_cheese"),
                            word("apple", "la pomme", "apple", "fr_apple"),
                            word("water", "l'eau", "water", "fr_water"),
                        ],
                    ),
                    LessonDef::new(
                        "Ordering",
                        vec![
                            word("I would like", "Je voudrais", "wouldlike", "fr_jevoudrais"),
                            word("the menu", "le menu", "menu", "fr_menu"),
                            word("the bill", "l'addition", "bill", "fr_bill"),
                            word("a table for two", "une table pour deux", "table", "fr_table2"),
                        ],
                    ),
                    LessonDef::new(
                        "Drinks",
                        vec![
                            word("coffee", "le café", "coffee", "fr_coffee"),
                            word("tea", "le thé", "tea", "fr_tea"),
                            word("wine", "le vin", "wine", "fr_wine"),
                            word("beer", "la bière", "beer", "fr_beer"),
                        ],
                    ),
                    LessonDef::new(
                        "At the Café",
                        vec![
                            word("I am hungry", "J'ai faim", "hungry", "fr_hungry"),
                            word("I am thirsty", "J'ai soif", "thirsty", "fr_thirsty"),
                            word("the special", "le plat du jour", "special", "fr_special"),
                            word("to pay", "payer", "pay", "fr_pay"),
                        ],
                    ),
                    LessonDef::new(
                        "Taste Adjectives",
                        vec![
                            word("tasty", "délicieux", "tasty", "fr_tasty"),
                            word("sweet", "sucré", "sweet", "fr_sweet"),
                            word("sour", "acide", "sour", "fr_sour"),
                            word("spicy", "épicé", "spicy", "fr_spicy"),
                        ],
                    ),
                ],
            ),
            UnitDef::new(
                "Travel & Directions",
                "Places, transport, directions and emergencies",
                3,
                vec![
                    LessonDef::new(
                        "Places",
                        vec![
                            word("station", "la gare", "station", "fr_station"),
                            word("airport", "l'aéroport", "airport", "fr_airport"),
                            word("hotel", "l'hôtel", "hotel", "fr_hotel"),
                            word("museum", "le musée", "museum", "fr_museum"),
                        ],
                    ),
                    LessonDef::new(
                        "Directions",
                        vec![
                            word("left", "à gauche", "left", "fr_left"),
                            word("right", "à droite", "right", "fr_right"),
                            word("straight", "tout droit", "straight", "fr_straight"),
                            word("near", "près", "near", "fr_near"),
                        ],
                    ),
                    LessonDef::new(
                        "Transport",
                        vec![
                            word("bus", "le bus", "bus", "fr_bus"),
                            word("train", "le train", "train", "fr_train"),
                            word("taxi", "un taxi", "taxi", "fr_taxi"),
                            word("subway", "le métro", "metro", "fr_metro"),
                        ],
                    ),
                    LessonDef::new(
                        "At the Hotel",
                        vec![
                            word("reservation", "une réservation", "reservation", "fr_reservation"),
                            word("key", "la clé", "key", "fr_key"),
                            word("room", "la chambre", "room", "fr_room"),
                            word("check-in", "l'enregistrement", "checkin", "fr_checkin"),
                        ],
                    ),
                    LessonDef::new(
                        "Emergencies & Help",
                        vec![
                            word("help", "à l'aide", "help", "fr_help"),
                            word("doctor", "le médecin", "doctor", "fr_doctor"),
                            word("police", "la police", "police", "fr_police"),
                            word("pharmacy", "la pharmacie", "pharmacy", "fr_pharmacy"),
                        ],
                    ),
                ],
            ),
        ],
    )
}
