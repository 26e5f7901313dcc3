use std::collections::HashMap;
use std::sync::OnceLock;

/// Country names (dataset spellings and common aliases) joined to ISO
/// 3166-1 alpha-2 codes. Countries missing here have no region breakdown
/// unless the loaded country dataset supplies a code.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("Afghanistan", "AF"),
    ("Algeria", "DZ"),
    ("Angola", "AO"),
    ("Argentina", "AR"),
    ("Australia", "AU"),
    ("Bangladesh", "BD"),
    ("Benin", "BJ"),
    ("Bolivia", "BO"),
    ("Brazil", "BR"),
    ("Burkina Faso", "BF"),
    ("Burundi", "BI"),
    ("Cameroon", "CM"),
    ("Canada", "CA"),
    ("Central African Rep.", "CF"),
    ("Central African Republic", "CF"),
    ("Chad", "TD"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("Colombia", "CO"),
    ("Dem. Rep. Congo", "CD"),
    ("Democratic Republic of the Congo", "CD"),
    ("DR Congo", "CD"),
    ("Congo", "CG"),
    ("Republic of the Congo", "CG"),
    ("Côte d'Ivoire", "CI"),
    ("Ivory Coast", "CI"),
    ("Cuba", "CU"),
    ("Djibouti", "DJ"),
    ("Ecuador", "EC"),
    ("Egypt", "EG"),
    ("El Salvador", "SV"),
    ("Eritrea", "ER"),
    ("Ethiopia", "ET"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Ghana", "GH"),
    ("Guatemala", "GT"),
    ("Guinea", "GN"),
    ("Haiti", "HT"),
    ("Honduras", "HN"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Iran", "IR"),
    ("Iraq", "IQ"),
    ("Italy", "IT"),
    ("Japan", "JP"),
    ("Jordan", "JO"),
    ("Kenya", "KE"),
    ("Lebanon", "LB"),
    ("Liberia", "LR"),
    ("Libya", "LY"),
    ("Madagascar", "MG"),
    ("Malawi", "MW"),
    ("Mali", "ML"),
    ("Mauritania", "MR"),
    ("Mexico", "MX"),
    ("Morocco", "MA"),
    ("Mozambique", "MZ"),
    ("Myanmar", "MM"),
    ("Nepal", "NP"),
    ("Nicaragua", "NI"),
    ("Niger", "NE"),
    ("Nigeria", "NG"),
    ("North Korea", "KP"),
    ("Pakistan", "PK"),
    ("Palestine", "PS"),
    ("Peru", "PE"),
    ("Philippines", "PH"),
    ("Russia", "RU"),
    ("Rwanda", "RW"),
    ("Senegal", "SN"),
    ("Sierra Leone", "SL"),
    ("Somalia", "SO"),
    ("South Africa", "ZA"),
    ("S. Sudan", "SS"),
    ("South Sudan", "SS"),
    ("Spain", "ES"),
    ("Sri Lanka", "LK"),
    ("Sudan", "SD"),
    ("Syria", "SY"),
    ("Tanzania", "TZ"),
    ("Togo", "TG"),
    ("Turkey", "TR"),
    ("Uganda", "UG"),
    ("Ukraine", "UA"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("United States of America", "US"),
    ("Venezuela", "VE"),
    ("Vietnam", "VN"),
    ("Yemen", "YE"),
    ("Zambia", "ZM"),
    ("Zimbabwe", "ZW"),
];

/// Lowercased, trimmed, internal whitespace collapsed.
pub fn normalize_country_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Static-table lookup.
pub fn country_code(name: &str) -> Option<&'static str> {
    static TABLE: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        COUNTRY_CODES
            .iter()
            .map(|(name, code)| (normalize_country_name(name), *code))
            .collect()
    });
    table.get(&normalize_country_name(name)).copied()
}
