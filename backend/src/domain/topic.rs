//! Topics (subjects put up for a vote) and their listing queries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{FieldViolation, FieldViolations};

/// Maximum number of characters in a topic title.
pub const TITLE_MAX: usize = 50;
/// Maximum number of characters in a topic description.
pub const DESCRIPTION_MAX: usize = 500;

/// Validated title and description for a topic that has not been stored yet.
///
/// # Examples
/// ```
/// use voting_backend::domain::TopicDraft;
///
/// let draft = TopicDraft::new(Some("Orçamento 2026".into()), Some("Aprovação".into()))
///     .expect("valid draft");
/// assert_eq!(draft.title(), "Orçamento 2026");
///
/// let errors = TopicDraft::new(None, Some(" ".into())).expect_err("blank fields");
/// assert_eq!(errors.iter().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    title: String,
    description: String,
}

impl TopicDraft {
    /// Validate raw input, reporting every failing field at once.
    ///
    /// Missing values are treated as blank.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, FieldViolations> {
        let title = title.unwrap_or_default();
        let description = description.unwrap_or_default();

        let mut violations = FieldViolations::default();
        check_text(
            &mut violations,
            "title",
            &title,
            TITLE_MAX,
            "O título é obrigatório.",
            "O título deve ter no máximo 50 caracteres.",
        );
        check_text(
            &mut violations,
            "description",
            &description,
            DESCRIPTION_MAX,
            "A descrição é obrigatória.",
            "A descrição deve ter no máximo 500 caracteres.",
        );
        violations.into_result()?;

        Ok(Self { title, description })
    }

    /// Topic title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Topic description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Stamp the draft with an identifier and creation time.
    pub fn into_topic(self, id: Uuid, created_at: DateTime<Utc>) -> Topic {
        Topic {
            id,
            title: self.title,
            description: self.description,
            created_at,
        }
    }
}

fn check_text(
    violations: &mut FieldViolations,
    field: &str,
    value: &str,
    max: usize,
    blank_message: &str,
    too_long_message: &str,
) {
    if value.trim().is_empty() {
        violations.push(field, blank_message);
    }
    if value.chars().count() > max {
        violations.push(field, too_long_message);
    }
}

/// A stored topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A topic joined with its most recently started voting session, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    /// The topic itself.
    pub topic: Topic,
    /// Latest session window, absent when no session was ever opened.
    pub latest_session: Option<SessionWindow>,
}

/// Identifier and time window of a voting session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    /// Session identifier.
    pub id: Uuid,
    /// Session start.
    pub start_time: DateTime<Utc>,
    /// Session end.
    pub end_time: DateTime<Utc>,
}

/// Sort direction for topic listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Oldest / smallest first.
    Asc,
    /// Newest / largest first.
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = FieldViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(FieldViolation::new(
                "order",
                "Informe uma direção de ordenação válida (asc ou desc)",
            )),
        }
    }
}

/// Topic column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicSortField {
    /// Creation instant.
    #[default]
    CreatedAt,
    /// Title.
    Title,
    /// Description.
    Description,
}

impl FromStr for TopicSortField {
    type Err = FieldViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            _ => Err(FieldViolation::new(
                "orderBy",
                "Informe um campo de ordenação válido (createdAt, title ou description)",
            )),
        }
    }
}

impl fmt::Display for TopicSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreatedAt => "createdAt",
            Self::Title => "title",
            Self::Description => "description",
        })
    }
}

/// Validated 1-based page request for topic listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicPageRequest {
    page: u32,
    size: u32,
    direction: SortDirection,
    sort_field: TopicSortField,
}

/// Message returned when a page number or size is below one.
pub const PAGE_MIN_MESSAGE: &str = "Informe um valor maior ou igual a 1";

impl TopicPageRequest {
    /// Validate raw paging input.
    ///
    /// # Examples
    /// ```
    /// use voting_backend::domain::{SortDirection, TopicPageRequest, TopicSortField};
    ///
    /// let request = TopicPageRequest::new(2, 10, "ASC", "title").expect("valid paging");
    /// assert_eq!(request.offset(), 10);
    /// assert_eq!(request.direction(), SortDirection::Asc);
    /// assert_eq!(request.sort_field(), TopicSortField::Title);
    /// assert!(TopicPageRequest::new(0, 0, "desc", "createdAt").is_err());
    /// ```
    pub fn new(page: i64, size: i64, order: &str, order_by: &str) -> Result<Self, FieldViolations> {
        let mut violations = FieldViolations::default();
        let page = positive(page, "page", &mut violations);
        let size = positive(size, "size", &mut violations);
        let direction = order
            .parse::<SortDirection>()
            .map_err(|violation| violations.extend(violation.into()))
            .ok();
        let sort_field = order_by
            .parse::<TopicSortField>()
            .map_err(|violation| violations.extend(violation.into()))
            .ok();

        match (page, size, direction, sort_field) {
            (Some(page), Some(size), Some(direction), Some(sort_field))
                if violations.is_empty() =>
            {
                Ok(Self {
                    page,
                    size,
                    direction,
                    sort_field,
                })
            }
            _ => Err(violations),
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Sort column.
    pub fn sort_field(&self) -> TopicSortField {
        self.sort_field
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.size)
    }
}

fn positive(value: i64, field: &str, violations: &mut FieldViolations) -> Option<u32> {
    match u32::try_from(value) {
        Ok(value) if value >= 1 => Some(value),
        _ => {
            violations.push(field, PAGE_MIN_MESSAGE);
            None
        }
    }
}

/// One page of topic summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
    /// Summaries on this page.
    pub content: Vec<TopicSummary>,
    /// The request that produced this page.
    pub request: TopicPageRequest,
    /// Number of topics across all pages.
    pub total_elements: u64,
}

impl TopicPage {
    /// Number of pages needed to hold every topic.
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.request.size()))
    }
}
