//! Deterministic category normalization.
//!
//! Two stages: the raw label goes through a fixed alias table; if that
//! misses or lands in a catch-all bucket, the merchant text is scanned
//! against an ordered keyword table. First hit wins in both tables.

use pointpilot_core::Category;

/// Raw upstream label (lower-cased, `_`-joined) to canonical category.
const LABEL_ALIASES: &[(&str, Category)] = &[
    // Food & drink
    ("food_and_drink", Category::Dining),
    ("food_and_drink_fast_food", Category::Dining),
    ("food_and_drink_restaurant", Category::Dining),
    ("food_and_drink_coffee", Category::Dining),
    ("food_and_drink_coffee_shop", Category::Dining),
    ("food_and_drink_bar", Category::Dining),
    ("restaurant", Category::Dining),
    ("bar_and_café", Category::Dining),
    ("restaurants", Category::Dining),
    ("dining", Category::Dining),
    ("fast_food", Category::Dining),
    ("coffee_shop", Category::Dining),
    ("food_and_drink_groceries", Category::Groceries),
    ("groceries", Category::Groceries),
    ("grocery", Category::Groceries),
    ("supermarkets", Category::Groceries),
    ("wholesale_stores", Category::Groceries),
    // Gas / auto
    ("gas", Category::Gas),
    ("gas_stations", Category::Gas),
    ("automotive_fuel", Category::Gas),
    ("transportation_gas", Category::Gas),
    ("fuel", Category::Gas),
    ("auto", Category::Gas),
    // Drugstores / health
    ("drugstores", Category::Drugstores),
    ("pharmacy", Category::Drugstores),
    ("medical_pharmacies_and_supplements", Category::Drugstores),
    ("healthcare", Category::Drugstores),
    ("medical_services", Category::Drugstores),
    // Travel
    ("travel", Category::Travel),
    ("travel_air", Category::Travel),
    ("travel_flights", Category::Travel),
    ("travel_car_rental", Category::Travel),
    ("travel_rental_cars", Category::Travel),
    ("travel_lodging", Category::Travel),
    ("travel_cruise", Category::Travel),
    ("travel_other", Category::Travel),
    ("airlines", Category::Travel),
    ("airline", Category::Travel),
    ("travel_agencies", Category::Travel),
    ("vehicle_rental", Category::Travel),
    ("lodging", Category::Travel),
    // Transit / tolls
    ("transportation", Category::TransitTolls),
    ("transportation_public_transit", Category::TransitTolls),
    ("transportation_taxis_and_ride_shares", Category::TransitTolls),
    ("transportation_tolls", Category::TransitTolls),
    ("transportation_parking", Category::TransitTolls),
    ("auto_transportation", Category::TransitTolls),
    ("transit", Category::TransitTolls),
    ("tolls", Category::TransitTolls),
    ("parking", Category::TransitTolls),
    ("rideshare", Category::TransitTolls),
    ("taxis_and_limousines", Category::TransitTolls),
    ("rail_services", Category::TransitTolls),
    ("tolls_and_bridge_fees", Category::TransitTolls),
    // Entertainment
    ("entertainment", Category::Entertainment),
    ("recreation", Category::Entertainment),
    ("arts_and_entertainment", Category::Entertainment),
    ("movies_and_music", Category::Entertainment),
    ("theatrical_events", Category::Entertainment),
    ("entertainment_music_and_audio", Category::Streaming),
    ("entertainment_tv_and_movies", Category::Streaming),
    ("streaming", Category::Streaming),
    // Shopping
    ("general_merchandise", Category::Shopping),
    ("general_merchandise_sporting_goods", Category::Shopping),
    ("general_merchandise_clothing", Category::Shopping),
    ("general_merchandise_clothing_and_accessories", Category::Shopping),
    ("general_merchandise_home_improvement", Category::Shopping),
    ("general_merchandise_online", Category::Shopping),
    ("general_merchandise_online_marketplaces", Category::Shopping),
    ("general_merchandise_superstores", Category::Shopping),
    ("general_merchandise_other", Category::Shopping),
    ("shopping", Category::Shopping),
    ("merchandise", Category::Shopping),
    ("department_stores", Category::Shopping),
    ("clothing_stores", Category::Shopping),
    ("general_retail", Category::Shopping),
    ("sporting_goods_stores", Category::Shopping),
    ("internet_purchase", Category::Shopping),
    // Catch-alls
    ("personal_care", Category::Other),
    ("general_services", Category::Other),
    ("general_services_other", Category::Other),
    ("service", Category::Other),
    ("service_financial", Category::Other),
    ("government", Category::Other),
    ("government_services", Category::Other),
    ("bank_fees", Category::Other),
    ("loans", Category::Other),
    ("income", Category::Other),
    ("rent_and_utilities", Category::Other),
    ("gifts", Category::Other),
    ("gifts_and_donations", Category::Other),
    ("misc", Category::Other),
    ("miscellaneous", Category::Other),
    ("general", Category::Other),
    ("uncategorized", Category::Other),
    ("none", Category::Other),
    ("other", Category::Other),
];

/// Merchant keyword inference, scanned top to bottom.
const MERCHANT_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Dining,
        &[
            "starbucks", "coffee", "cafe", "mcdonald", "burger", "taco", "chipotle",
            "restaurant", "pizza", "grill", "sushi", "doordash", "grubhub", "uber eats",
        ],
    ),
    (
        Category::Groceries,
        &[
            "whole foods", "trader joe", "kroger", "safeway", "h-e-b", "aldi", "publix",
            "grocery", "supermarket",
        ],
    ),
    (
        Category::Gas,
        &["shell", "exxon", "chevron", "valero", "mobil", "sunoco", "gas station", "fuel"],
    ),
    (
        Category::Drugstores,
        &["walgreens", "cvs", "rite aid", "pharmacy"],
    ),
    (
        Category::TransitTolls,
        &[
            "uber", "lyft", "clipper", "metro", "transit", "e-zpass", "ezpass", "toll",
            "parking", "mta",
        ],
    ),
    (
        Category::Travel,
        &[
            "airlines", "airline", "delta", "southwest", "united air", "american air",
            "hotel", "marriott", "hilton", "hyatt", "airbnb", "expedia", "booking.com",
            "travel",
        ],
    ),
    (
        Category::Streaming,
        &["netflix", "spotify", "hulu", "disney+", "youtube", "hbo max"],
    ),
    (
        Category::Entertainment,
        &["concert", "movie", "theater", "theatre", "cinema", "ticketmaster", "music"],
    ),
    (
        Category::Shopping,
        &["amazon", "target", "walmart", "best buy", "costco", "store", "market"],
    ),
];

fn label_key(lowered: &str) -> String {
    lowered
        .replace('&', " and ")
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Alias-table lookup only. Accepts the canonical names too.
pub fn lookup_label(raw_category: &str) -> Option<Category> {
    let lowered = raw_category.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    if let Ok(c) = lowered.parse::<Category>() {
        return Some(c);
    }
    let key = label_key(&lowered);
    LABEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered || *alias == key)
        .map(|(_, c)| *c)
}

/// Merchant keyword inference only.
pub fn infer_from_merchant(merchant_text: &str) -> Option<Category> {
    let merchant = merchant_text.to_lowercase();
    if merchant.trim().is_empty() {
        return None;
    }
    MERCHANT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| merchant.contains(kw)))
        .map(|(c, _)| *c)
}

/// Map a raw label plus merchant text to one canonical category.
/// Never fails: anything unresolvable is `Other`.
pub fn normalize(raw_category: &str, merchant_text: &str) -> Category {
    match lookup_label(raw_category) {
        Some(c) if !c.is_catch_all() => c,
        _ => infer_from_merchant(merchant_text).unwrap_or(Category::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table_hits() {
        assert_eq!(normalize("FOOD_AND_DRINK", ""), Category::Dining);
        assert_eq!(normalize("  Travel  ", ""), Category::Travel);
        assert_eq!(normalize("general_merchandise_online", ""), Category::Shopping);
        assert_eq!(normalize("Restaurants", ""), Category::Dining);
    }

    #[test]
    fn test_spaced_labels_match_underscored_aliases() {
        assert_eq!(normalize("Food and Drink", ""), Category::Dining);
        assert_eq!(normalize("Gas Stations", ""), Category::Gas);
        assert_eq!(normalize("Arts & Entertainment", ""), Category::Entertainment);
    }

    #[test]
    fn test_misc_with_coffee_merchant_infers_dining() {
        assert_eq!(normalize("Misc", "Starbucks Coffee"), Category::Dining);
    }

    #[test]
    fn test_label_wins_over_merchant_when_specific() {
        // Label is authoritative unless it is a catch-all.
        assert_eq!(normalize("gas", "Starbucks"), Category::Gas);
    }

    #[test]
    fn test_unknown_label_uses_merchant() {
        assert_eq!(normalize("SOMETHING_NEW", "CVS/Pharmacy #123"), Category::Drugstores);
    }

    #[test]
    fn test_unresolvable_is_other() {
        assert_eq!(normalize("", ""), Category::Other);
        assert_eq!(normalize("misc", "ACME WIDGETS LLC"), Category::Other);
        assert_eq!(normalize("   ", "   "), Category::Other);
    }

    #[test]
    fn test_keyword_table_order_is_first_match() {
        // "whole foods market" hits Groceries before Shopping's "market".
        assert_eq!(infer_from_merchant("Whole Foods Market"), Some(Category::Groceries));
        // "uber eats" is listed under Dining ahead of Transit's "uber".
        assert_eq!(infer_from_merchant("UBER EATS 8/12"), Some(Category::Dining));
        assert_eq!(infer_from_merchant("UBER TRIP"), Some(Category::TransitTolls));
        // "delta" is travel, even though "Delta Market" also contains "market".
        assert_eq!(infer_from_merchant("Delta Market"), Some(Category::Travel));
    }

    #[test]
    fn test_every_category_reachable_by_label() {
        for c in Category::ALL {
            assert_eq!(lookup_label(c.as_str()), Some(c));
        }
    }
}
