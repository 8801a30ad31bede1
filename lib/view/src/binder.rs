//! Subject and term resolution, and the bound view data.
//!
//! `resolve_subject` is the single place a session is turned into the
//! directory record whose data the view shows. Every results and
//! support binding goes through it, so guardian scoping and guest
//! pinning cannot be bypassed by a crafted request.

use crate::channels::{SupportChannel, visible_channels};
use crate::error::ViewError;
use flemzin_access::{SessionKind, SessionRecord, TermVisibility};
use flemzin_core::{ClassLevel, RegistrationId, TermId};
use flemzin_directory::{Gradebook, TermReport, UserDirectory, UserRecord};
use serde::Serialize;
use tracing::{debug, warn};

/// One selectable subject in a guardian's student switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectOption {
    reg_id: RegistrationId,
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_level: Option<ClassLevel>,
}

impl SubjectOption {
    #[must_use]
    pub fn reg_id(&self) -> &RegistrationId {
        &self.reg_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn class_level(&self) -> Option<ClassLevel> {
        self.class_level
    }
}

/// The fully bound results page: the resolved subject, the selected
/// term's report, and what else the principal may switch to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    subject_name: String,
    subject_key: RegistrationId,
    visibility: TermVisibility,
    selected_term: TermId,
    report: TermReport,
    /// Terms the principal may switch to, newest first. Under
    /// `CurrentOnly` this is the selected term alone.
    selectable_terms: Vec<TermId>,
    /// Dependents a guardian may switch between; empty for everyone
    /// else.
    subject_options: Vec<SubjectOption>,
}

impl ResultsView {
    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    #[must_use]
    pub fn subject_key(&self) -> &RegistrationId {
        &self.subject_key
    }

    #[must_use]
    pub fn visibility(&self) -> TermVisibility {
        self.visibility
    }

    #[must_use]
    pub fn selected_term(&self) -> TermId {
        self.selected_term
    }

    #[must_use]
    pub fn report(&self) -> &TermReport {
        &self.report
    }

    #[must_use]
    pub fn selectable_terms(&self) -> &[TermId] {
        &self.selectable_terms
    }

    #[must_use]
    pub fn subject_options(&self) -> &[SubjectOption] {
        &self.subject_options
    }
}

/// The bound support page: the channels visible to the principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportView {
    channels: Vec<SupportChannel>,
}

impl SupportView {
    #[must_use]
    pub fn channels(&self) -> &[SupportChannel] {
        &self.channels
    }
}

/// Binds directory and gradebook data into view values for a session.
#[derive(Debug, Clone, Copy)]
pub struct ViewBinder<'a> {
    directory: &'a UserDirectory,
    gradebook: &'a Gradebook,
}

impl<'a> ViewBinder<'a> {
    #[must_use]
    pub fn new(directory: &'a UserDirectory, gradebook: &'a Gradebook) -> Self {
        Self {
            directory,
            gradebook,
        }
    }

    /// The directory record behind the session itself: the signed-in
    /// principal, or the student a guest pass is bound to.
    fn acting_record(&self, session: &SessionRecord) -> Result<&'a UserRecord, ViewError> {
        let key = session.subject_key();
        self.directory.find_by_reg_id(key).ok_or_else(|| {
            warn!(subject = %key, "session subject not in directory");
            ViewError::NotFound {
                key: key.to_string(),
            }
        })
    }

    /// Resolves the record whose data the view shows.
    ///
    /// Guests are pinned to their bound key; any requested override is
    /// ignored. Guardians may request a linked dependent and default
    /// to the most senior one; requesting their own key counts as no
    /// request, since navigation links carry the login id. Everyone
    /// else resolves to themselves.
    pub fn resolve_subject(
        &self,
        session: &SessionRecord,
        requested: Option<&RegistrationId>,
    ) -> Result<&'a UserRecord, ViewError> {
        let acting = self.acting_record(session)?;
        if session.kind() == SessionKind::Guest {
            debug!(subject = %acting.reg_id(), "guest pinned to bound subject");
            return Ok(acting);
        }

        let requested = requested.filter(|key| *key != acting.reg_id());
        if !acting.role().is_guardian() {
            return match requested {
                None => Ok(acting),
                Some(other) => {
                    warn!(acting = %acting.reg_id(), requested = %other, "subject request outside own record");
                    Err(ViewError::GuardianMismatch {
                        acting: acting.reg_id().clone(),
                        requested: other.clone(),
                    })
                }
            };
        }

        match requested {
            Some(key) if acting.guardian_links().contains(key) => {
                self.directory.find_by_reg_id(key).ok_or_else(|| ViewError::NotFound {
                    key: key.to_string(),
                })
            }
            Some(key) => {
                warn!(acting = %acting.reg_id(), requested = %key, "no guardian link for requested subject");
                Err(ViewError::GuardianMismatch {
                    acting: acting.reg_id().clone(),
                    requested: key.clone(),
                })
            }
            None => {
                let dependents = self
                    .directory
                    .resolve_dependents(acting.reg_id())
                    .map_err(|error| {
                        warn!(%error, "guardian links failed to resolve");
                        ViewError::NotFound {
                            key: acting.reg_id().to_string(),
                        }
                    })?;
                dependents.first().copied().ok_or_else(|| ViewError::NotFound {
                    key: acting.reg_id().to_string(),
                })
            }
        }
    }

    /// Picks the term to show for a subject.
    ///
    /// The most recent recorded term (by the term-key recency
    /// ordering) is the default. Under `CurrentOnly` it is also the
    /// only selectable term; requesting any other is rejected without
    /// consulting whether that term exists.
    pub fn resolve_term(
        &self,
        subject: &RegistrationId,
        visibility: TermVisibility,
        requested: Option<TermId>,
    ) -> Result<TermId, ViewError> {
        let available = self.gradebook.terms_for(subject);
        let Some(latest) = available.iter().max().copied() else {
            return Err(ViewError::NotFound {
                key: subject.to_string(),
            });
        };

        match visibility {
            TermVisibility::CurrentOnly => match requested {
                Some(term) if term != latest => {
                    debug!(%term, "restricted term requested under current-only visibility");
                    Err(ViewError::TermRestricted { term })
                }
                _ => Ok(latest),
            },
            TermVisibility::All => match requested {
                Some(term) if available.contains(&term) => Ok(term),
                Some(term) => Err(ViewError::NotFound {
                    key: term.to_string(),
                }),
                None => Ok(latest),
            },
        }
    }

    /// Binds the results page for a session.
    pub fn bind_results(
        &self,
        session: &SessionRecord,
        visibility: TermVisibility,
        requested_subject: Option<&RegistrationId>,
        requested_term: Option<TermId>,
    ) -> Result<ResultsView, ViewError> {
        let subject = self.resolve_subject(session, requested_subject)?;
        let selected_term = self.resolve_term(subject.reg_id(), visibility, requested_term)?;
        let report = self
            .gradebook
            .report(subject.reg_id(), selected_term)
            .ok_or_else(|| ViewError::NotFound {
                key: subject.reg_id().to_string(),
            })?
            .clone();

        let selectable_terms = match visibility {
            TermVisibility::CurrentOnly => vec![selected_term],
            TermVisibility::All => self.gradebook.terms_for(subject.reg_id()),
        };

        debug!(
            subject = %subject.reg_id(),
            term = %selected_term,
            "results view bound"
        );
        Ok(ResultsView {
            subject_name: subject.display_name().to_string(),
            subject_key: subject.reg_id().clone(),
            visibility,
            selected_term,
            report,
            selectable_terms,
            subject_options: self.subject_options(session)?,
        })
    }

    /// Binds the support page for a session.
    ///
    /// Channel scoping follows the signed-in principal, not the
    /// resolved results subject: a guardian sees guardian channels
    /// even while viewing a dependent's data.
    pub fn bind_support(&self, session: &SessionRecord) -> Result<SupportView, ViewError> {
        let acting = self.acting_record(session)?;
        Ok(SupportView {
            channels: visible_channels(acting),
        })
    }

    /// The student switcher for guardians; empty for everyone else.
    fn subject_options(&self, session: &SessionRecord) -> Result<Vec<SubjectOption>, ViewError> {
        if session.kind() == SessionKind::Guest {
            return Ok(Vec::new());
        }
        let acting = self.acting_record(session)?;
        if !acting.role().is_guardian() {
            return Ok(Vec::new());
        }
        let dependents = self
            .directory
            .resolve_dependents(acting.reg_id())
            .map_err(|error| {
                warn!(%error, "guardian links failed to resolve");
                ViewError::NotFound {
                    key: acting.reg_id().to_string(),
                }
            })?;
        Ok(dependents
            .into_iter()
            .map(|record| SubjectOption {
                reg_id: record.reg_id().clone(),
                display_name: record.display_name().to_string(),
                class_level: record.class_level(),
            })
            .collect())
    }
}
