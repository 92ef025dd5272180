//! Registration flows offered by the app

use super::form_state::FormState;
use super::schema::{FieldSpec, Readiness, Step};
use super::wizard::{WizardError, WizardSession};
use serde::{Deserialize, Serialize};

pub const GENRES: &[&str] = &[
    "Beauty",
    "Fashion",
    "Food",
    "Technology",
    "Lifestyle",
    "Travel",
    "Fitness",
    "Entertainment",
];

pub const WORK_TYPES: &[&str] = &[
    "Post creation",
    "Video production",
    "Live streaming",
    "Event appearance",
    "Ambassador",
    "Model shoot",
    "Review article",
];

pub const AREAS: &[&str] = &[
    "Nationwide",
    "Kanto",
    "Kansai",
    "Tokai",
    "Hokkaido",
    "Tohoku",
    "Chugoku",
    "Shikoku",
    "Kyushu",
    "Online only",
];

pub const AGE_GROUPS: &[&str] = &[
    "Teens",
    "Early 20s",
    "Late 20s",
    "Early 30s",
    "Late 30s",
    "40s and up",
];

pub const REGIONS: &[&str] = &[
    "Nationwide",
    "Kanto",
    "Kansai",
    "Tokai",
    "Hokkaido",
    "Tohoku",
    "Chugoku",
    "Shikoku",
    "Kyushu",
];

pub const OBJECTIVES: &[&str] = &[
    "Awareness",
    "Sales promotion",
    "Brand image",
    "Engagement",
    "Lead generation",
    "Service adoption",
];

pub const GENDERS: &[&str] = &["", "male", "female"];

const PLATFORMS: &[(&str, &str)] = &[
    ("instagram", "Instagram"),
    ("youtube", "YouTube"),
    ("tiktok", "TikTok"),
    ("twitter", "X (Twitter)"),
];

/// Which registration wizard to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    #[default]
    Influencer,
    Company,
}

impl FlowKind {
    pub const ALL: [FlowKind; 2] = [FlowKind::Influencer, FlowKind::Company];

    /// Stable identifier used in payloads and file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Influencer => "influencer",
            Self::Company => "company",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Influencer => "Influencer registration",
            Self::Company => "Company registration",
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        match self {
            Self::Influencer => influencer_steps(),
            Self::Company => company_steps(),
        }
    }

    pub fn start(&self) -> Result<WizardSession, WizardError> {
        WizardSession::blank(self.name(), self.steps())
    }
}

fn influencer_steps() -> Vec<Step> {
    let platforms = PLATFORMS
        .iter()
        .map(|(name, label)| {
            FieldSpec::group(
                name,
                label,
                vec![
                    FieldSpec::text("username", "Username"),
                    FieldSpec::number("followers", "Followers"),
                ],
            )
        })
        .collect();

    vec![
        Step::new(
            "Basic info",
            vec![
                FieldSpec::text("name", "Name"),
                FieldSpec::text("email", "Email"),
            ],
        )
        .ready_when(Readiness::all(vec![
            Readiness::non_empty("name"),
            Readiness::non_empty("email"),
        ])),
        Step::new(
            "SNS accounts",
            vec![
                FieldSpec::group("platforms", "SNS", platforms),
                FieldSpec::choice("categories", "Categories", GENRES),
                FieldSpec::multiline("description", "Self introduction"),
            ],
        )
        .ready_when(Readiness::custom(has_platform_account)),
        Step::new(
            "Work info",
            vec![
                FieldSpec::records(
                    "pastWorks",
                    "Past work",
                    vec![
                        FieldSpec::text("company", "Company"),
                        FieldSpec::text("description", "Description"),
                        FieldSpec::text("period", "Period"),
                    ],
                ),
                FieldSpec::group(
                    "desiredFee",
                    "Desired fee",
                    vec![
                        FieldSpec::number("post", "Post"),
                        FieldSpec::number("video", "Video"),
                        FieldSpec::number("live", "Live"),
                        FieldSpec::number("event", "Event"),
                    ],
                ),
                FieldSpec::choice("workTypes", "Work types", WORK_TYPES),
                FieldSpec::choice("availableAreas", "Available areas", AREAS),
                FieldSpec::group(
                    "ngList",
                    "NG list",
                    vec![
                        FieldSpec::entries("products", "Products"),
                        FieldSpec::entries("companies", "Companies"),
                        FieldSpec::text("others", "Other"),
                    ],
                ),
            ],
        ),
    ]
}

fn has_platform_account(state: &FormState) -> bool {
    let platforms = state.group("platforms");
    PLATFORMS
        .iter()
        .any(|(name, _)| !platforms.group(name).text("username").trim().is_empty())
}

fn company_steps() -> Vec<Step> {
    vec![
        Step::new(
            "Company profile",
            vec![
                FieldSpec::text("companyName", "Company name"),
                FieldSpec::text("industry", "Industry"),
                FieldSpec::text("website", "Website"),
            ],
        )
        .ready_when(Readiness::non_empty("companyName")),
        Step::new(
            "Business info",
            vec![
                FieldSpec::group(
                    "contactPerson",
                    "Contact",
                    vec![
                        FieldSpec::text("name", "Name"),
                        FieldSpec::text("department", "Department"),
                        FieldSpec::text("position", "Position"),
                        FieldSpec::text("phone", "Phone"),
                        FieldSpec::text("email", "Email"),
                    ],
                ),
                FieldSpec::group(
                    "budget",
                    "Budget",
                    vec![
                        FieldSpec::number("min", "Min"),
                        FieldSpec::number("max", "Max"),
                    ],
                ),
                FieldSpec::choice("targetGenres", "Target genres", GENRES),
                FieldSpec::group(
                    "targetDemographics",
                    "Target",
                    vec![
                        FieldSpec::choice("ageGroups", "Age groups", AGE_GROUPS),
                        FieldSpec::select("gender", "Gender", GENDERS),
                        FieldSpec::choice("regions", "Regions", REGIONS),
                    ],
                ),
                FieldSpec::choice("campaignObjectives", "Objectives", OBJECTIVES),
                FieldSpec::text("pastExperience", "Past experience"),
                FieldSpec::multiline("productDescription", "Product description"),
            ],
        )
        .ready_when(Readiness::all(vec![
            Readiness::non_empty_in("contactPerson", "name"),
            Readiness::non_empty_in("contactPerson", "email"),
        ])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Record;
    use pretty_assertions::assert_eq;

    mod flow_kind {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_names_and_step_counts() {
            assert_eq!(FlowKind::Influencer.name(), "influencer");
            assert_eq!(FlowKind::Company.name(), "company");
            assert_eq!(FlowKind::Influencer.steps().len(), 3);
            assert_eq!(FlowKind::Company.steps().len(), 2);
        }

        #[test]
        fn test_serde_uses_lowercase_names() {
            let json = serde_json::to_string(&FlowKind::Company).unwrap();
            assert_eq!(json, "\"company\"");
            let parsed: FlowKind = serde_json::from_str("\"influencer\"").unwrap();
            assert_eq!(parsed, FlowKind::Influencer);
        }

        #[test]
        fn test_start_builds_blank_session() {
            let session = FlowKind::Influencer.start().unwrap();
            let state = session.state();
            assert_eq!(session.flow(), "influencer");
            assert!(state.records("pastWorks").is_empty());
            assert_eq!(state.group("desiredFee").number("video"), 0);
            assert!(state.group("ngList").list("products").is_empty());
            assert_eq!(
                state.group("platforms").group("tiktok").text("username"),
                ""
            );
        }
    }

    mod influencer {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basic_info_needs_name_and_email() {
            let steps = FlowKind::Influencer.steps();
            let state = FormState::new().update("name", "Rin");
            assert!(!steps[0].is_ready(&state));
            assert!(steps[0].is_ready(&state.update("email", "rin@example.com")));
        }

        #[test]
        fn test_sns_needs_one_platform_username() {
            let steps = FlowKind::Influencer.steps();
            assert!(!steps[1].is_ready(&FormState::new()));

            let youtube = Record::from_fields([("username", "rin_ch")]);
            let state =
                FormState::new().update("platforms", Record::new().update("youtube", youtube));
            assert!(steps[1].is_ready(&state));
        }

        #[test]
        fn test_work_info_is_always_ready() {
            let steps = FlowKind::Influencer.steps();
            assert!(steps[2].is_ready(&FormState::new()));
        }
    }

    mod company {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_profile_needs_company_name() {
            let steps = FlowKind::Company.steps();
            assert!(!steps[0].is_ready(&FormState::new()));
            assert!(steps[0].is_ready(&FormState::new().update("companyName", "Acme")));
        }

        #[test]
        fn test_business_info_needs_contact_name_and_email() {
            let steps = FlowKind::Company.steps();
            let contact = Record::from_fields([("name", "Sato"), ("email", "")]);
            let state = FormState::new().update("contactPerson", contact.clone());
            assert!(!steps[1].is_ready(&state));

            let state =
                state.update("contactPerson", contact.update("email", "sato@acme.example"));
            assert!(steps[1].is_ready(&state));
        }

        #[test]
        fn test_gender_defaults_to_unspecified() {
            let session = FlowKind::Company.start().unwrap();
            assert_eq!(
                session.state().group("targetDemographics").text("gender"),
                ""
            );
        }
    }
}
