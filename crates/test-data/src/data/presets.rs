//! Preset scenario catalog for the sheet generator.
//!
//! Each preset pins (or randomizes) a sheet type and supplies the title and
//! task vocabulary for that scenario. Unknown keys fall back to the fully
//! randomized preset.

use signups::SheetType;

/// Sheet type a preset prescribes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetType {
    Fixed(SheetType),
    Random,
}

/// Whether tasks generated from a preset ask volunteers for a detail note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedDetails {
    Yes,
    No,
    Random,
}

/// A named generation scenario.
#[derive(Debug)]
pub struct Preset {
    pub key: &'static str,
    pub sheet_type: PresetType,
    /// Sheet title pool for fixed-type presets.
    pub titles: &'static [&'static str],
    /// Adjective/noun pools for randomized title synthesis.
    pub title_adjectives: &'static [&'static str],
    pub title_nouns: &'static [&'static str],
    /// Task title pool for fixed-type presets.
    pub tasks: &'static [&'static str],
    pub need_details: NeedDetails,
    /// Label shown to volunteers when `need_details` resolves to yes.
    pub details_text: &'static str,
}

impl Preset {
    /// True for the fully randomized preset.
    pub fn is_random(&self) -> bool {
        self.sheet_type == PresetType::Random
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        key: "bake_sale",
        sheet_type: PresetType::Fixed(SheetType::Single),
        titles: &[
            "Spring Bake Sale",
            "Fall Bake Sale",
            "Holiday Fundraiser Bake Sale",
            "Winter Bake Sale",
        ],
        title_adjectives: &[],
        title_nouns: &[],
        tasks: &[
            "Chocolate Chip Cookies (2 doz)",
            "Brownies (1 pan)",
            "Cupcakes (1 doz)",
            "Lemon Bars (1 pan)",
            "Snickerdoodles (2 doz)",
            "Setup / Cleanup",
            "Cash Box / Cashier",
            "Packaging & Labeling",
        ],
        need_details: NeedDetails::No,
        details_text: "",
    },
    Preset {
        key: "carnival",
        sheet_type: PresetType::Fixed(SheetType::MultiDay),
        titles: &[
            "Spring Carnival",
            "Fall Festival",
            "Field Day",
            "School Fun Fair",
        ],
        title_adjectives: &[],
        title_nouns: &[],
        tasks: &[
            "Game Booth",
            "Food Booth",
            "Ticket Sales",
            "First Aid Station",
            "Parking Attendant",
            "Face Painting",
            "Bounce House Monitor",
            "Information Booth",
            "Setup Crew",
            "Cleanup Crew",
        ],
        need_details: NeedDetails::No,
        details_text: "",
    },
    Preset {
        key: "committee",
        sheet_type: PresetType::Fixed(SheetType::Recurring),
        titles: &[
            "PTA Executive Committee",
            "Fundraising Committee",
            "Events Committee",
            "Curriculum Committee",
            "Safety Committee",
        ],
        title_adjectives: &[],
        title_nouns: &[],
        tasks: &[
            "Meeting Facilitator",
            "Minutes Taker",
            "Hospitality",
            "Agenda Prep",
            "Treasurer Report",
            "Communications Lead",
        ],
        need_details: NeedDetails::Yes,
        details_text: "Role Notes",
    },
    Preset {
        key: "volunteer_fair",
        sheet_type: PresetType::Fixed(SheetType::Ongoing),
        titles: &[
            "Volunteer Opportunities Fair",
            "Back to School Fair",
            "Community Resource Fair",
        ],
        title_adjectives: &[],
        title_nouns: &[],
        tasks: &[
            "Registration Desk",
            "Tour Guide",
            "Information Table",
            "Photography",
            "Social Media Coverage",
            "Greeter",
            "Refreshment Station",
        ],
        need_details: NeedDetails::No,
        details_text: "",
    },
    Preset {
        key: "random",
        sheet_type: PresetType::Random,
        titles: &[],
        title_adjectives: &[
            "Spring",
            "Fall",
            "Winter",
            "Summer",
            "Annual",
            "Community",
            "Family",
            "School",
            "Weekend",
            "Friday",
        ],
        title_nouns: &[
            "Fundraiser",
            "Cleanup",
            "Celebration",
            "Fair",
            "Drive",
            "Workshop",
            "Potluck",
            "Social",
            "Showcase",
            "Festival",
        ],
        tasks: &[],
        need_details: NeedDetails::Random,
        details_text: "Additional Notes",
    },
];

/// Looks up a preset by key, falling back to the randomized preset.
pub fn find_preset(key: &str) -> &'static Preset {
    PRESETS
        .iter()
        .find(|p| p.key == key)
        .unwrap_or_else(|| find_preset("random"))
}
