//! Bangladesh administrative geography.
//!
//! Divisions and their districts, used to validate profile locations and
//! blood request targets. Donor matching is exact district equality; there
//! is no radius or fuzzy geographic matching.

/// The eight administrative divisions.
pub const DIVISIONS: [&str; 8] = [
    "Barishal",
    "Chattogram",
    "Dhaka",
    "Khulna",
    "Rajshahi",
    "Rangpur",
    "Mymensingh",
    "Sylhet",
];

/// Districts grouped by division, in (division, districts) pairs.
const DISTRICTS_BY_DIVISION: [(&str, &[&str]); 8] = [
    (
        "Barishal",
        &["Barguna", "Barishal", "Bhola", "Jhalokati", "Patuakhali", "Pirojpur"],
    ),
    (
        "Chattogram",
        &[
            "Bandarban",
            "Brahmanbaria",
            "Chandpur",
            "Chattogram",
            "Cumilla",
            "Cox's Bazar",
            "Feni",
            "Khagrachari",
            "Lakshmipur",
            "Noakhali",
            "Rangamati",
        ],
    ),
    (
        "Dhaka",
        &[
            "Dhaka",
            "Faridpur",
            "Gazipur",
            "Gopalganj",
            "Kishoreganj",
            "Madaripur",
            "Manikganj",
            "Munshiganj",
            "Narayanganj",
            "Narsingdi",
            "Rajbari",
            "Shariatpur",
            "Tangail",
        ],
    ),
    (
        "Khulna",
        &[
            "Bagerhat",
            "Chuadanga",
            "Jessore",
            "Jhenaidah",
            "Khulna",
            "Kushtia",
            "Magura",
            "Meherpur",
            "Narail",
            "Satkhira",
        ],
    ),
    (
        "Rajshahi",
        &[
            "Bogra",
            "Joypurhat",
            "Naogaon",
            "Natore",
            "Chapainawabganj",
            "Pabna",
            "Rajshahi",
            "Sirajganj",
        ],
    ),
    (
        "Rangpur",
        &[
            "Dinajpur",
            "Gaibandha",
            "Kurigram",
            "Lalmonirhat",
            "Nilphamari",
            "Panchagarh",
            "Rangpur",
            "Thakurgaon",
        ],
    ),
    ("Mymensingh", &["Jamalpur", "Mymensingh", "Netrokona", "Sherpur"]),
    ("Sylhet", &["Habiganj", "Moulvibazar", "Sunamganj", "Sylhet"]),
];

/// Districts belonging to the given division, or an empty slice if the
/// division name is unknown.
pub fn districts_of(division: &str) -> &'static [&'static str] {
    DISTRICTS_BY_DIVISION
        .iter()
        .find(|(name, _)| *name == division)
        .map(|(_, districts)| *districts)
        .unwrap_or(&[])
}

/// Whether `name` is a known district (case-sensitive, any division).
pub fn is_known_district(name: &str) -> bool {
    DISTRICTS_BY_DIVISION
        .iter()
        .any(|(_, districts)| districts.contains(&name))
}

/// Whether `name` is a known division (case-sensitive).
pub fn is_known_division(name: &str) -> bool {
    DIVISIONS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_division_has_districts() {
        for division in DIVISIONS {
            assert!(
                !districts_of(division).is_empty(),
                "{division} should have districts"
            );
        }
    }

    #[test]
    fn district_lookup() {
        assert!(is_known_district("Dhaka"));
        assert!(is_known_district("Cox's Bazar"));
        assert!(!is_known_district("Gotham"));
        // Case-sensitive on purpose; stored values are canonical.
        assert!(!is_known_district("dhaka"));
    }

    #[test]
    fn unknown_division_yields_empty_slice() {
        assert!(districts_of("Atlantis").is_empty());
    }
}
