/// Display name used when a group has no vendor match and an empty
/// description ("unnamed subscription", kept in the product's locale).
pub const UNNAMED_SUBSCRIPTION: &str = "מנוי ללא שם";

/// Category assigned to candidates with no catalog match.
pub const FALLBACK_CATEGORY: &str = "other";

#[derive(Debug, Clone, Copy)]
pub struct VendorCatalogEntry {
    /// Uppercase substring searched for in the charge description.
    pub token: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
}

/// Known recurring-charge vendors, scanned linearly: the first entry whose
/// token is a substring of the uppercased description wins, so declaration
/// order is match precedence and part of observable behavior. Keep this a
/// slice, not a map.
///
/// Tokens must stay specific enough that generic charge text (e.g. a local
/// gym membership) falls through to the description fallback.
pub const VENDOR_CATALOG: &[VendorCatalogEntry] = &[
    VendorCatalogEntry {
        token: "NETFLIX",
        display_name: "Netflix",
        category: "streaming",
        icon: "🎬",
    },
    VendorCatalogEntry {
        token: "SPOTIFY",
        display_name: "Spotify",
        category: "music",
        icon: "🎵",
    },
    VendorCatalogEntry {
        token: "YOUTUBE",
        display_name: "YouTube Premium",
        category: "streaming",
        icon: "📺",
    },
    VendorCatalogEntry {
        token: "DISNEY",
        display_name: "Disney+",
        category: "streaming",
        icon: "🏰",
    },
    VendorCatalogEntry {
        token: "HBO",
        display_name: "HBO Max",
        category: "streaming",
        icon: "🎥",
    },
    VendorCatalogEntry {
        token: "APPLE",
        display_name: "Apple",
        category: "software",
        icon: "🍎",
    },
    VendorCatalogEntry {
        token: "AMAZON",
        display_name: "Amazon Prime",
        category: "streaming",
        icon: "📦",
    },
    VendorCatalogEntry {
        token: "GOOGLE",
        display_name: "Google One",
        category: "software",
        icon: "☁️",
    },
    VendorCatalogEntry {
        token: "MICROSOFT",
        display_name: "Microsoft 365",
        category: "software",
        icon: "🪟",
    },
    VendorCatalogEntry {
        token: "ADOBE",
        display_name: "Adobe",
        category: "software",
        icon: "🎨",
    },
    VendorCatalogEntry {
        token: "DROPBOX",
        display_name: "Dropbox",
        category: "software",
        icon: "🗂️",
    },
    VendorCatalogEntry {
        token: "CELLCOM",
        display_name: "Cellcom",
        category: "telecom",
        icon: "📱",
    },
    VendorCatalogEntry {
        token: "PARTNER",
        display_name: "Partner",
        category: "telecom",
        icon: "📱",
    },
    VendorCatalogEntry {
        token: "PELEPHONE",
        display_name: "Pelephone",
        category: "telecom",
        icon: "📱",
    },
    VendorCatalogEntry {
        token: "BEZEQ",
        display_name: "Bezeq",
        category: "telecom",
        icon: "📞",
    },
    // Short token; keep it after the specific telecom names so e.g.
    // "PELEPHONE HOTLINE" still resolves to Pelephone.
    VendorCatalogEntry {
        token: "HOT",
        display_name: "HOT",
        category: "telecom",
        icon: "📡",
    },
    VendorCatalogEntry {
        token: "HOLMES",
        display_name: "Holmes Place",
        category: "gym",
        icon: "🏋️",
    },
    VendorCatalogEntry {
        token: "NYTIMES",
        display_name: "The New York Times",
        category: "news",
        icon: "📰",
    },
    VendorCatalogEntry {
        token: "HAARETZ",
        display_name: "Haaretz",
        category: "news",
        icon: "📰",
    },
];

/// First catalog entry whose token appears in the uppercased description.
pub fn match_vendor(description: &str) -> Option<&'static VendorCatalogEntry> {
    let upper = description.to_uppercase();
    VENDOR_CATALOG.iter().find(|entry| upper.contains(entry.token))
}

pub fn icon_for_token(token: &str) -> Option<&'static str> {
    VENDOR_CATALOG
        .iter()
        .find(|entry| entry.token == token)
        .map(|entry| entry.icon)
}
