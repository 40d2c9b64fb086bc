/**
 * Profile Types
 *
 * A profile belongs to exactly one user and carries nested experience and
 * education entries. The request types accept every field as optional so that
 * missing values surface as validation errors rather than parse failures.
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::identity::Identity;
use crate::shared::user::UserSummary;
use crate::shared::validation::{non_blank, parse_date, FieldError, Validator};

/// Stored profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// Owner; set at creation and never reassigned
    pub user: Identity,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl Profile {
    /// Create an empty profile for `user` from a validated request
    pub fn create(user: Identity, request: ProfileRequest) -> Self {
        let mut profile = Self {
            id: uuid::Uuid::new_v4().to_string(),
            user,
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: Social::default(),
            date: Utc::now(),
        };
        profile.apply(request);
        profile
    }

    /// Overwrite the fields present in `request`
    ///
    /// Absent optional fields leave the stored value untouched; nested
    /// experience and education lists are never affected.
    pub fn apply(&mut self, request: ProfileRequest) {
        let ProfileRequest {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            youtube,
            twitter,
            facebook,
            linkedin,
            instagram,
        } = request;

        if let Some(v) = non_blank(company) {
            self.company = Some(v);
        }
        if let Some(v) = non_blank(website) {
            self.website = Some(v);
        }
        if let Some(v) = non_blank(location) {
            self.location = Some(v);
        }
        if let Some(v) = non_blank(bio) {
            self.bio = Some(v);
        }
        if let Some(v) = non_blank(status) {
            self.status = v;
        }
        if let Some(v) = non_blank(githubusername) {
            self.githubusername = Some(v);
        }
        if let Some(v) = non_blank(skills) {
            self.skills = split_skills(&v);
        }

        let social = &mut self.social;
        for (slot, value) in [
            (&mut social.youtube, youtube),
            (&mut social.twitter, twitter),
            (&mut social.facebook, facebook),
            (&mut social.linkedin, linkedin),
            (&mut social.instagram, instagram),
        ] {
            if let Some(v) = non_blank(value) {
                *slot = Some(v);
            }
        }
    }
}

/// Social network links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Work experience entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Education entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Profile as returned to clients, with the owner's name and avatar in
/// place of the bare owner identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: String,
    pub user: UserSummary,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: Social,
    pub date: DateTime<Utc>,
}

impl ProfileView {
    pub fn new(profile: Profile, owner: UserSummary) -> Self {
        Self {
            id: profile.id,
            user: owner,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            experience: profile.experience,
            education: profile.education,
            social: profile.social,
            date: profile.date,
        }
    }
}

/// Create/update profile request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    /// Comma-separated skill list
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

impl ProfileRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.required("status", self.status.as_deref(), "Status is required")
            .required("skills", self.skills.as_deref(), "Skills is required");
        v.finish()
    }
}

/// Add-experience request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExperienceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExperienceRequest {
    /// Validate and convert into a stored entry
    pub fn into_experience(self) -> Result<Experience, Vec<FieldError>> {
        let mut v = Validator::new();
        v.required("title", self.title.as_deref(), "Title is required")
            .required("company", self.company.as_deref(), "Company is required")
            .required("from", self.from.as_deref(), "From date is required")
            .date("from", self.from.as_deref(), "From date must be a valid date (YYYY-MM-DD)")
            .date("to", self.to.as_deref(), "To date must be a valid date (YYYY-MM-DD)");
        v.finish()?;

        let (from, to) = parse_range(self.from.as_deref(), self.to.as_deref())?;
        Ok(Experience {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title.unwrap_or_default().trim().to_string(),
            company: self.company.unwrap_or_default().trim().to_string(),
            location: non_blank(self.location),
            from,
            to,
            current: self.current.unwrap_or(false),
            description: non_blank(self.description),
        })
    }
}

/// Add-education request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EducationRequest {
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub fieldofstudy: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EducationRequest {
    /// Validate and convert into a stored entry
    pub fn into_education(self) -> Result<Education, Vec<FieldError>> {
        let mut v = Validator::new();
        v.required("school", self.school.as_deref(), "School is required")
            .required("degree", self.degree.as_deref(), "Degree is required")
            .required("fieldofstudy", self.fieldofstudy.as_deref(), "Field of study is required")
            .required("from", self.from.as_deref(), "From date is required")
            .date("from", self.from.as_deref(), "From date must be a valid date (YYYY-MM-DD)")
            .date("to", self.to.as_deref(), "To date must be a valid date (YYYY-MM-DD)");
        v.finish()?;

        let (from, to) = parse_range(self.from.as_deref(), self.to.as_deref())?;
        Ok(Education {
            id: uuid::Uuid::new_v4().to_string(),
            school: self.school.unwrap_or_default().trim().to_string(),
            degree: self.degree.unwrap_or_default().trim().to_string(),
            fieldofstudy: self.fieldofstudy.unwrap_or_default().trim().to_string(),
            from,
            to,
            current: self.current.unwrap_or(false),
            description: non_blank(self.description),
        })
    }
}

/// Split a comma-separated skill list, trimming and dropping empties
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(NaiveDate, Option<NaiveDate>), Vec<FieldError>> {
    let from = from
        .and_then(parse_date)
        .ok_or_else(|| vec![FieldError::new("from", "From date is required")])?;
    let to = to.and_then(parse_date);
    if let Some(to) = to {
        if to < from {
            return Err(vec![FieldError::new("to", "To date must not be before from date")]);
        }
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(status: &str, skills: &str) -> ProfileRequest {
        ProfileRequest {
            status: Some(status.into()),
            skills: Some(skills.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_skills() {
        assert_eq!(split_skills(" rust, go ,,sql "), vec!["rust", "go", "sql"]);
        assert!(split_skills(" , ").is_empty());
    }

    #[test]
    fn test_profile_requires_status_and_skills() {
        let errors = ProfileRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(request("Developer", "rust").validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut profile = Profile::create(
            Identity::new("u1"),
            ProfileRequest {
                company: Some("Acme".into()),
                youtube: Some("yt".into()),
                ..request("Developer", "rust")
            },
        );
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.social.youtube.as_deref(), Some("yt"));

        profile.apply(request("Senior Developer", "rust, go"));
        assert_eq!(profile.status, "Senior Developer");
        assert_eq!(profile.skills, vec!["rust", "go"]);
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.user, Identity::new("u1"));
    }

    #[test]
    fn test_experience_validation() {
        let errors = ExperienceRequest::default().into_experience().unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.clone()).collect();
        assert_eq!(fields, vec!["title", "company", "from"]);

        let exp = ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            from: Some("2019-01-01".into()),
            to: Some("2020-06-30".into()),
            ..Default::default()
        }
        .into_experience()
        .unwrap();
        assert_eq!(exp.from, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert!(!exp.current);
    }

    #[test]
    fn test_range_must_be_ordered() {
        let errors = EducationRequest {
            school: Some("MIT".into()),
            degree: Some("BSc".into()),
            fieldofstudy: Some("CS".into()),
            from: Some("2020-01-01".into()),
            to: Some("2019-01-01".into()),
            ..Default::default()
        }
        .into_education()
        .unwrap_err();
        assert_eq!(errors[0].field.as_deref(), Some("to"));
    }

    #[test]
    fn test_view_embeds_owner_summary() {
        let profile = Profile::create(Identity::new("u1"), request("Dev", "rust"));
        let view = ProfileView::new(
            profile,
            UserSummary {
                id: Identity::new("u1"),
                name: "Ada".into(),
                avatar: "a.png".into(),
            },
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["user"]["name"], "Ada");
        assert_eq!(json["status"], "Dev");
    }
}
