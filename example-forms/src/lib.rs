//! Sample field lists shared by the hosts' tests and demos.

use dynform::FieldList;

/// Name, email, age 18 to 65, plan, newsletter and an address group.
pub const REGISTRATION_JSON: &str = include_str!("../forms/registration.json");

/// A simple user profile.
pub const USER_PROFILE_JSON: &str = include_str!("../forms/user_profile.json");

/// Sandwich order with select defaults and a group of extras.
pub const SANDWICH_JSON: &str = include_str!("../forms/sandwich.json");

/// Job application with a required consent checkbox.
pub const JOB_APPLICATION_JSON: &str = include_str!("../forms/job_application.json");

/// Contains a field of type `radio`, which cannot be rendered.
pub const RADIO_JSON: &str = include_str!("../forms/radio.json");

pub fn registration() -> anyhow::Result<FieldList> {
    Ok(FieldList::from_json_str(REGISTRATION_JSON)?)
}

pub fn user_profile() -> anyhow::Result<FieldList> {
    Ok(FieldList::from_json_str(USER_PROFILE_JSON)?)
}

pub fn sandwich() -> anyhow::Result<FieldList> {
    Ok(FieldList::from_json_str(SANDWICH_JSON)?)
}

pub fn job_application() -> anyhow::Result<FieldList> {
    Ok(FieldList::from_json_str(JOB_APPLICATION_JSON)?)
}

pub fn radio() -> anyhow::Result<FieldList> {
    Ok(FieldList::from_json_str(RADIO_JSON)?)
}

/// Every sample by name.
pub fn all() -> anyhow::Result<Vec<(&'static str, FieldList)>> {
    Ok(vec![
        ("registration", registration()?),
        ("user_profile", user_profile()?),
        ("sandwich", sandwich()?),
        ("job_application", job_application()?),
    ])
}
