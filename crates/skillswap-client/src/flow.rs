//! The learner's rate-then-review flow for one skill listing.
//!
//! ```text
//!            mount
//!              │  lookup existing rating
//!              ▼
//!   ┌──── Rating ─────┐  found: lookup existing review
//!   │ submit_rating   │
//!   │ continue_to_review
//!   ▼                 ▼
//! Review ──skip──▶ Complete ◀── review found
//!   │ submit_review
//!   ▼
//! (back to sessions, or Complete with AfterReview::ShowCompletion)
//! ```
//!
//! [`RatingReviewFlow`] never performs I/O. Each method returns the effects
//! the caller must carry out, and server responses come back in through the
//! `on_*` methods.

use chrono::Utc;
use tracing::warn;

use skillswap_models::{
    CreateRatingDto, CreateReviewDto, REVIEW_MAX_CHARS, REVIEW_MIN_CHARS, Rating,
    RatingCreatedResponse, Review, ReviewCreatedResponse, Stars, UserRef, check_review_text,
};

use crate::api::ApiError;
use crate::effects::{ApiRequest, Effect, Route};
use crate::session::{FlowContext, Role, Session, SessionData, SessionDetails};
use crate::stars::StarPicker;

pub const SIGN_IN_REQUIRED: &str = "Please sign in to rate sessions";
pub const LEARNERS_ONLY: &str = "Only learners can rate sessions";
pub const INVALID_LISTING: &str = "Invalid skill listing";
pub const SELECT_A_RATING: &str = "Please select a rating";
pub const MISSING_INFORMATION: &str = "Missing required information";
pub const ALREADY_RATED_ADD_REVIEW: &str =
    "You have already rated this listing. You can optionally add a review.";
pub const ALREADY_RATED_AND_REVIEWED: &str =
    "Rating submitted! You have already reviewed this listing.";
pub const ALREADY_RATED_MODIFY_REVIEW: &str =
    "You have already rated this listing. You can modify your review below.";
pub const ALREADY_RATED_CHECKING: &str =
    "You have already rated this listing. Checking your existing rating...";
pub const ALREADY_REVIEWED: &str = "You have already reviewed this listing.";
pub const RATING_SUBMITTED: &str = "Rating submitted successfully!";
pub const RATING_FAILED: &str = "Failed to submit rating";
pub const REVIEW_SUBMITTED: &str = "Review submitted successfully!";
pub const REVIEW_FAILED: &str = "Failed to submit review";
pub const REVIEW_MIN_HINT: &str = "(Minimum 10 characters)";

/// Where a successful review submission leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfterReview {
    /// Leave the flow for the learner's sessions list.
    #[default]
    ReturnToSessions,
    /// Stay and show the completion step, as skipping does.
    ShowCompletion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowOptions {
    pub after_review: AfterReview,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RatingStep {
    Rating {
        picker: StarPicker,
        /// Set when the learner rated this listing before.
        existing: Option<Rating>,
    },
    Review {
        submitted: Rating,
        draft: String,
    },
    Complete {
        submitted: Rating,
    },
}

impl RatingStep {
    fn initial() -> Self {
        RatingStep::Rating {
            picker: StarPicker::new(),
            existing: None,
        }
    }

    /// Position in the progress indicator, starting at 1.
    pub fn number(&self) -> u8 {
        match self {
            RatingStep::Rating { .. } => 1,
            RatingStep::Review { .. } => 2,
            RatingStep::Complete { .. } => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RatingStep::Rating { .. } => "Rate Your Experience",
            RatingStep::Review { .. } => "Share Your Review (Optional)",
            RatingStep::Complete { .. } => "Thank You!",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            RatingStep::Rating { .. } => "How was your learning session?",
            RatingStep::Review { .. } => "Tell others about your experience",
            RatingStep::Complete { .. } => "Your feedback has been submitted",
        }
    }

    /// The rating already on record, if the step carries one.
    pub fn submitted(&self) -> Option<&Rating> {
        match self {
            RatingStep::Rating { existing, .. } => existing.as_ref(),
            RatingStep::Review { submitted, .. } | RatingStep::Complete { submitted } => {
                Some(submitted)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Ratings,
    Reviews,
}

#[derive(Debug, Clone, PartialEq)]
enum Submission {
    Rating(CreateRatingDto),
    Review,
}

#[derive(Debug, Clone)]
pub struct RatingReviewFlow {
    options: FlowOptions,
    listing_id: String,
    user_id: String,
    teacher_id: Option<String>,
    learner_id: Option<String>,
    session_data: Option<SessionData>,
    step: RatingStep,
    lookup: Option<Lookup>,
    submission: Option<Submission>,
    review_error: Option<String>,
    exited: Option<Route>,
}

impl RatingReviewFlow {
    /// Opens the flow.
    ///
    /// Visitors who are not signed-in learners, or who arrive without a
    /// listing, are sent away and the returned flow is already exited.
    /// Otherwise the flow starts at [`RatingStep::Rating`] and looks up any
    /// rating the learner left before.
    pub fn mount(
        session: &Session,
        context: FlowContext,
        options: FlowOptions,
    ) -> (Self, Vec<Effect>) {
        let listing_id = context.listing().map(str::to_string);
        let mut flow = Self {
            options,
            listing_id: listing_id.clone().unwrap_or_default(),
            user_id: String::new(),
            teacher_id: context.resolve_teacher_id(),
            learner_id: context.resolve_learner_id(session.user.as_ref()),
            session_data: context.session_data.clone(),
            step: RatingStep::initial(),
            lookup: None,
            submission: None,
            review_error: None,
            exited: None,
        };

        let Some(user) = session.user.as_ref() else {
            let route = Route::SignIn {
                return_url: format!("/rating/{}", flow.listing_id),
                return_state: context.return_state,
            };
            let effects = flow.exit(Some(Effect::error(SIGN_IN_REQUIRED)), route);
            return (flow, effects);
        };
        flow.user_id = user.id.clone();

        if user.role != Role::Learner {
            let effects = flow.exit(Some(Effect::error(LEARNERS_ONLY)), Route::LearnerSessions);
            return (flow, effects);
        }

        if listing_id.is_none() {
            let effects = flow.exit(Some(Effect::error(INVALID_LISTING)), Route::LearnerSessions);
            return (flow, effects);
        }

        let effects = vec![flow.start_lookup(Lookup::Ratings)];
        (flow, effects)
    }

    fn exit(&mut self, notice: Option<Effect>, route: Route) -> Vec<Effect> {
        self.exited = Some(route.clone());
        notice
            .into_iter()
            .chain(std::iter::once(Effect::Navigate(route)))
            .collect()
    }

    fn start_lookup(&mut self, lookup: Lookup) -> Effect {
        self.lookup = Some(lookup);
        let listing_id = self.listing_id.clone();
        Effect::Send(match lookup {
            Lookup::Ratings => ApiRequest::LookupRatings { listing_id },
            Lookup::Reviews => ApiRequest::LookupReviews { listing_id },
        })
    }

    /// Takes the outstanding lookup if it is `expected`.
    fn settle_lookup(&mut self, expected: Lookup) -> bool {
        if self.exited.is_some() || self.lookup != Some(expected) {
            return false;
        }
        self.lookup = None;
        true
    }

    pub fn on_ratings_loaded(&mut self, result: Result<Vec<Rating>, ApiError>) -> Vec<Effect> {
        if !self.settle_lookup(Lookup::Ratings) {
            return Vec::new();
        }

        let ratings = match result {
            Ok(ratings) => ratings,
            Err(err) => {
                warn!(error = %err, listing_id = %self.listing_id, "Existing rating lookup failed");
                return Vec::new();
            }
        };

        let RatingStep::Rating { picker, existing } = &mut self.step else {
            return Vec::new();
        };
        let Some(found) = ratings
            .into_iter()
            .find(|rating| rating.learner_id.is(&self.user_id))
        else {
            return Vec::new();
        };

        if let Some(stars) = found.stars() {
            *picker = StarPicker::with_committed(stars);
        }
        *existing = Some(found);

        vec![
            Effect::info(ALREADY_RATED_ADD_REVIEW),
            self.start_lookup(Lookup::Reviews),
        ]
    }

    pub fn on_reviews_loaded(&mut self, result: Result<Vec<Review>, ApiError>) -> Vec<Effect> {
        if !self.settle_lookup(Lookup::Reviews) {
            return Vec::new();
        }

        // The learner may already have moved on to the review step while the
        // lookup was out; a review found then still completes the flow.
        let (submitted, reviewing) = match &self.step {
            RatingStep::Rating {
                existing: Some(existing),
                ..
            } => (existing.clone(), false),
            RatingStep::Review { submitted, .. } if self.submission.is_none() => {
                (submitted.clone(), true)
            }
            _ => return Vec::new(),
        };

        let learner_id = self.learner_id.as_deref().unwrap_or(&self.user_id);
        let already_reviewed = match result {
            Ok(reviews) => reviews
                .iter()
                .any(|review| review.learner_id.is(learner_id)),
            Err(err) => {
                warn!(error = %err, listing_id = %self.listing_id, "Existing review lookup failed");
                false
            }
        };

        if already_reviewed {
            self.step = RatingStep::Complete { submitted };
            self.review_error = None;
            vec![Effect::success(ALREADY_RATED_AND_REVIEWED)]
        } else {
            if !reviewing {
                self.enter_review(submitted);
            }
            Vec::new()
        }
    }

    fn enter_review(&mut self, submitted: Rating) {
        self.step = RatingStep::Review {
            submitted,
            draft: String::new(),
        };
        self.review_error = None;
    }

    fn accepts_input(&self) -> bool {
        self.exited.is_none() && self.submission.is_none()
    }

    fn picker_mut(&mut self) -> Option<&mut StarPicker> {
        match &mut self.step {
            RatingStep::Rating {
                picker,
                existing: None,
            } if self.exited.is_none() => Some(picker),
            _ => None,
        }
    }

    pub fn select_star(&mut self, stars: Stars) {
        if let Some(picker) = self.picker_mut() {
            picker.select(stars);
        }
    }

    pub fn hover_star(&mut self, stars: Stars) {
        if let Some(picker) = self.picker_mut() {
            picker.hover(stars);
        }
    }

    pub fn leave_stars(&mut self) {
        if let Some(picker) = self.picker_mut() {
            picker.leave();
        }
    }

    pub fn submit_rating(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }
        let (committed, existing) = match &self.step {
            RatingStep::Rating { picker, existing } => (picker.committed(), existing.clone()),
            _ => return Vec::new(),
        };

        let Some(stars) = committed else {
            return vec![Effect::error(SELECT_A_RATING)];
        };
        let (Some(teacher_id), Some(learner_id)) = (self.teacher_id.clone(), self.learner_id.clone())
        else {
            return vec![Effect::error(MISSING_INFORMATION)];
        };

        if let Some(existing) = existing {
            self.enter_review(existing);
            return vec![Effect::info(ALREADY_RATED_MODIFY_REVIEW)];
        }

        let dto = CreateRatingDto {
            learner_id,
            teacher_id,
            listing_id: self.listing_id.clone(),
            rating: stars.get(),
        };
        self.submission = Some(Submission::Rating(dto.clone()));

        vec![Effect::Send(ApiRequest::CreateRating(dto))]
    }

    pub fn on_rating_created(
        &mut self,
        result: Result<RatingCreatedResponse, ApiError>,
    ) -> Vec<Effect> {
        if self.exited.is_some() {
            return Vec::new();
        }
        let dto = match self.submission.take() {
            Some(Submission::Rating(dto)) => dto,
            other => {
                self.submission = other;
                return Vec::new();
            }
        };

        match result {
            Ok(response) => {
                let submitted = response
                    .rating
                    .unwrap_or_else(|| rating_from_request(&dto));
                self.enter_review(submitted);
                vec![Effect::success(RATING_SUBMITTED)]
            }
            Err(err) if err.is_already_rated() => vec![
                Effect::info(ALREADY_RATED_CHECKING),
                self.start_lookup(Lookup::Ratings),
            ],
            Err(err) => {
                warn!(error = %err, "Rating submission failed");
                vec![Effect::error(err.message_or(RATING_FAILED))]
            }
        }
    }

    /// Moves on to the review step with the rating found on mount.
    pub fn continue_to_review(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }
        if let RatingStep::Rating {
            existing: Some(existing),
            ..
        } = &self.step
        {
            let existing = existing.clone();
            self.enter_review(existing);
        }
        Vec::new()
    }

    /// Replaces the review draft, capped at the maximum review length.
    pub fn edit_review(&mut self, text: &str) {
        if self.exited.is_some() {
            return;
        }
        if let RatingStep::Review { draft, .. } = &mut self.step {
            *draft = text.chars().take(REVIEW_MAX_CHARS).collect();
            self.review_error = None;
        }
    }

    pub fn submit_review(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }
        let (rating, draft) = match &self.step {
            RatingStep::Review { submitted, draft } => (submitted.rating, draft.clone()),
            _ => return Vec::new(),
        };

        let review_text = match check_review_text(&draft) {
            Ok(text) => text.to_string(),
            Err(err) => {
                let message = err.to_string();
                self.review_error = Some(message.clone());
                return vec![Effect::error(message)];
            }
        };
        let (Some(teacher_id), Some(learner_id)) = (self.teacher_id.clone(), self.learner_id.clone())
        else {
            return vec![Effect::error(MISSING_INFORMATION)];
        };

        self.submission = Some(Submission::Review);

        vec![Effect::Send(ApiRequest::CreateReview(CreateReviewDto {
            learner_id,
            teacher_id,
            listing_id: self.listing_id.clone(),
            review_text,
            rating,
        }))]
    }

    pub fn on_review_created(
        &mut self,
        result: Result<ReviewCreatedResponse, ApiError>,
    ) -> Vec<Effect> {
        if self.exited.is_some() {
            return Vec::new();
        }
        match self.submission.take() {
            Some(Submission::Review) => {}
            other => {
                self.submission = other;
                return Vec::new();
            }
        }
        let RatingStep::Review { submitted, .. } = &self.step else {
            return Vec::new();
        };
        let submitted = submitted.clone();

        match result {
            Ok(_) => {
                let notice = Effect::success(REVIEW_SUBMITTED);
                match self.options.after_review {
                    AfterReview::ReturnToSessions => {
                        self.exit(Some(notice), Route::LearnerSessions)
                    }
                    AfterReview::ShowCompletion => {
                        self.step = RatingStep::Complete { submitted };
                        vec![notice]
                    }
                }
            }
            Err(err) if err.is_already_reviewed() => {
                self.step = RatingStep::Complete { submitted };
                vec![Effect::info(ALREADY_REVIEWED)]
            }
            Err(err) => {
                warn!(error = %err, "Review submission failed");
                vec![Effect::error(err.message_or(REVIEW_FAILED))]
            }
        }
    }

    /// Finishes without writing a review.
    pub fn skip_review(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }
        if let RatingStep::Review { submitted, .. } = &self.step {
            self.step = RatingStep::Complete {
                submitted: submitted.clone(),
            };
        }
        Vec::new()
    }

    pub fn back_to_sessions(&mut self) -> Vec<Effect> {
        if self.exited.is_some() {
            return Vec::new();
        }
        self.exit(None, Route::LearnerSessions)
    }

    pub fn step(&self) -> &RatingStep {
        &self.step
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub fn teacher_id(&self) -> Option<&str> {
        self.teacher_id.as_deref()
    }

    pub fn learner_id(&self) -> Option<&str> {
        self.learner_id.as_deref()
    }

    /// True while a create request is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    /// Where the flow sent the user when it ended, if it has.
    pub fn exited(&self) -> Option<&Route> {
        self.exited.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.exited.is_none()
    }

    pub fn can_submit_rating(&self) -> bool {
        match &self.step {
            RatingStep::Rating { picker, .. } => {
                picker.committed().is_some() && self.accepts_input()
            }
            _ => false,
        }
    }

    pub fn can_submit_review(&self) -> bool {
        match &self.step {
            RatingStep::Review { draft, .. } => {
                draft.trim().chars().count() >= REVIEW_MIN_CHARS && self.accepts_input()
            }
            _ => false,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (&self.step, self.is_submitting()) {
            (_, true) => "Submitting...",
            (RatingStep::Review { .. }, false) => "Submit Review",
            _ => "Submit Rating",
        }
    }

    /// Label for the stars currently shown: the picker's preview or commit,
    /// or the rating on record.
    pub fn rating_label(&self) -> Option<&'static str> {
        match &self.step {
            RatingStep::Rating {
                picker,
                existing: None,
            } => picker.label(),
            step => step.submitted().and_then(Rating::stars).map(Stars::label),
        }
    }

    /// Inline validation message from the last review submit attempt.
    pub fn review_error(&self) -> Option<&str> {
        self.review_error.as_deref()
    }

    pub fn review_counter(&self) -> Option<String> {
        match &self.step {
            RatingStep::Review { draft, .. } => Some(format!(
                "{}/{} characters",
                draft.chars().count(),
                REVIEW_MAX_CHARS
            )),
            _ => None,
        }
    }

    /// Shown while a draft has been started but is still too short.
    pub fn review_hint(&self) -> Option<&'static str> {
        match &self.step {
            RatingStep::Review { draft, .. } => {
                let chars = draft.chars().count();
                (chars > 0 && chars < REVIEW_MIN_CHARS).then_some(REVIEW_MIN_HINT)
            }
            _ => None,
        }
    }

    pub fn session_details(&self) -> Option<SessionDetails> {
        self.session_data.as_ref().map(SessionData::details)
    }
}

/// Stands in for the server's copy when a create response omits it.
fn rating_from_request(dto: &CreateRatingDto) -> Rating {
    Rating {
        id: String::new(),
        learner_id: UserRef::Id(dto.learner_id.clone()),
        teacher_id: UserRef::Id(dto.teacher_id.clone()),
        listing_id: dto.listing_id.clone(),
        rating: dto.rating,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Notice, NoticeLevel};
    use crate::session::CurrentUser;
    use skillswap_core::ErrorCode;

    const LISTING: &str = "listing-1";
    const LEARNER: &str = "learner-1";
    const TEACHER: &str = "teacher-1";

    fn learner_session() -> Session {
        Session::signed_in(CurrentUser::new(LEARNER, Role::Learner), "token")
    }

    fn context() -> FlowContext {
        FlowContext::for_listing(LISTING).with_teacher(TEACHER)
    }

    fn stars(n: u8) -> Stars {
        Stars::new(n).unwrap()
    }

    fn rating(learner: &str, value: u8) -> Rating {
        Rating {
            id: format!("rating-{learner}"),
            learner_id: UserRef::from(learner),
            teacher_id: UserRef::from(TEACHER),
            listing_id: LISTING.to_string(),
            rating: value,
            created_at: Utc::now(),
        }
    }

    fn review(learner: &str) -> Review {
        Review {
            id: format!("review-{learner}"),
            learner_id: UserRef::Populated {
                id: learner.to_string(),
                fullname: Some("Ada".to_string()),
            },
            teacher_id: UserRef::from(TEACHER),
            listing_id: LISTING.to_string(),
            review_text: "Great session, learned a lot".to_string(),
            rating: 5,
            created_at: Utc::now(),
        }
    }

    fn mounted(options: FlowOptions) -> RatingReviewFlow {
        let (mut flow, _) = RatingReviewFlow::mount(&learner_session(), context(), options);
        flow.on_ratings_loaded(Ok(Vec::new()));
        flow
    }

    fn in_review(options: FlowOptions) -> RatingReviewFlow {
        let mut flow = mounted(options);
        flow.select_star(stars(4));
        flow.submit_rating();
        flow.on_rating_created(Ok(RatingCreatedResponse {
            success: true,
            message: None,
            rating: Some(rating(LEARNER, 4)),
        }));
        flow
    }

    fn notices(effects: &[Effect]) -> Vec<Notice> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Notify(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mount_without_user_redirects_to_sign_in() {
        let state = serde_json::json!({ "teacherID": TEACHER });
        let (flow, effects) = RatingReviewFlow::mount(
            &Session::anonymous(),
            context().with_return_state(state.clone()),
            FlowOptions::default(),
        );

        let route = Route::SignIn {
            return_url: "/rating/listing-1".to_string(),
            return_state: Some(state),
        };
        assert_eq!(
            effects,
            vec![
                Effect::error(SIGN_IN_REQUIRED),
                Effect::Navigate(route.clone())
            ]
        );
        assert_eq!(flow.exited(), Some(&route));
        assert_eq!(flow.step().number(), 1);
    }

    #[test]
    fn test_mount_rejects_non_learner() {
        let session = Session::signed_in(CurrentUser::new("t", Role::Teacher), "token");
        let (flow, effects) = RatingReviewFlow::mount(&session, context(), FlowOptions::default());

        assert_eq!(
            effects,
            vec![
                Effect::error(LEARNERS_ONLY),
                Effect::Navigate(Route::LearnerSessions)
            ]
        );
        assert!(!flow.is_active());
    }

    #[test]
    fn test_mount_rejects_missing_listing() {
        let context = FlowContext::default().with_teacher(TEACHER);
        let (_, effects) =
            RatingReviewFlow::mount(&learner_session(), context, FlowOptions::default());

        assert_eq!(
            effects,
            vec![
                Effect::error(INVALID_LISTING),
                Effect::Navigate(Route::LearnerSessions)
            ]
        );
    }

    #[test]
    fn test_mount_looks_up_existing_rating() {
        let (flow, effects) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());

        assert_eq!(
            effects,
            vec![Effect::Send(ApiRequest::LookupRatings {
                listing_id: LISTING.to_string()
            })]
        );
        assert!(flow.is_active());
        assert_eq!(flow.learner_id(), Some(LEARNER));
    }

    #[test]
    fn test_existing_rating_prefills_and_checks_reviews() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        let effects = flow.on_ratings_loaded(Ok(vec![rating("someone-else", 2), rating(LEARNER, 5)]));

        assert_eq!(
            effects,
            vec![
                Effect::info(ALREADY_RATED_ADD_REVIEW),
                Effect::Send(ApiRequest::LookupReviews {
                    listing_id: LISTING.to_string()
                })
            ]
        );
        match flow.step() {
            RatingStep::Rating { picker, existing } => {
                assert_eq!(picker.committed(), Some(stars(5)));
                assert_eq!(existing.as_ref().map(|r| r.rating), Some(5));
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(flow.rating_label(), Some("Excellent - Outstanding experience"));
    }

    #[test]
    fn test_other_learners_rating_is_ignored() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        let effects = flow.on_ratings_loaded(Ok(vec![rating("someone-else", 2)]));

        assert!(effects.is_empty());
        assert_eq!(flow.step(), &RatingStep::initial());
    }

    #[test]
    fn test_failed_rating_lookup_stays_on_rating() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        let effects = flow.on_ratings_loaded(Err(ApiError::rejected(500, None, "boom")));

        assert!(effects.is_empty());
        assert_eq!(flow.step().number(), 1);
    }

    #[test]
    fn test_existing_review_completes_flow() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 5)]));
        let effects = flow.on_reviews_loaded(Ok(vec![review(LEARNER)]));

        assert_eq!(effects, vec![Effect::success(ALREADY_RATED_AND_REVIEWED)]);
        match flow.step() {
            RatingStep::Complete { submitted } => assert_eq!(submitted.rating, 5),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_review_lookup_failure_moves_to_review() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 3)]));
        let effects = flow.on_reviews_loaded(Err(ApiError::rejected(200, None, "")));

        assert!(effects.is_empty());
        assert_eq!(flow.step().number(), 2);
    }

    #[test]
    fn test_review_found_after_continuing_early_completes_flow() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 5)]));
        flow.continue_to_review();
        assert_eq!(flow.step().number(), 2);

        let effects = flow.on_reviews_loaded(Ok(vec![review(LEARNER)]));

        assert_eq!(effects, vec![Effect::success(ALREADY_RATED_AND_REVIEWED)]);
        match flow.step() {
            RatingStep::Complete { submitted } => assert_eq!(submitted.rating, 5),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_no_review_after_continuing_early_keeps_draft() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 5)]));
        flow.continue_to_review();
        flow.edit_review("Halfway through typing");

        assert!(flow.on_reviews_loaded(Ok(Vec::new())).is_empty());
        match flow.step() {
            RatingStep::Review { draft, .. } => assert_eq!(draft, "Halfway through typing"),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_responses_are_dropped() {
        let mut flow = mounted(FlowOptions::default());

        assert!(flow.on_reviews_loaded(Ok(vec![review(LEARNER)])).is_empty());
        assert!(flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 5)])).is_empty());
        assert!(
            flow.on_rating_created(Ok(RatingCreatedResponse {
                success: true,
                message: None,
                rating: Some(rating(LEARNER, 1)),
            }))
            .is_empty()
        );
        assert_eq!(flow.step(), &RatingStep::initial());
    }

    #[test]
    fn test_submit_without_selection_is_rejected() {
        let mut flow = mounted(FlowOptions::default());
        assert!(!flow.can_submit_rating());
        assert_eq!(flow.submit_rating(), vec![Effect::error(SELECT_A_RATING)]);
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_submit_without_teacher_is_rejected() {
        let (mut flow, _) = RatingReviewFlow::mount(
            &learner_session(),
            FlowContext::for_listing(LISTING),
            FlowOptions::default(),
        );
        flow.select_star(stars(3));
        assert_eq!(flow.submit_rating(), vec![Effect::error(MISSING_INFORMATION)]);
    }

    #[test]
    fn test_submit_rating_posts_and_guards() {
        let mut flow = mounted(FlowOptions::default());
        flow.select_star(stars(4));

        let effects = flow.submit_rating();
        assert_eq!(
            effects,
            vec![Effect::Send(ApiRequest::CreateRating(CreateRatingDto {
                learner_id: LEARNER.to_string(),
                teacher_id: TEACHER.to_string(),
                listing_id: LISTING.to_string(),
                rating: 4,
            }))]
        );
        assert!(flow.is_submitting());
        assert_eq!(flow.submit_label(), "Submitting...");

        // double click
        assert!(flow.submit_rating().is_empty());
        assert!(!flow.can_submit_rating());
    }

    #[test]
    fn test_rating_success_moves_to_review() {
        let flow = in_review(FlowOptions::default());
        match flow.step() {
            RatingStep::Review { submitted, draft } => {
                assert_eq!(submitted.rating, 4);
                assert!(draft.is_empty());
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert!(!flow.is_submitting());
        assert_eq!(flow.submit_label(), "Submit Review");
    }

    #[test]
    fn test_rating_success_without_body_uses_request() {
        let mut flow = mounted(FlowOptions::default());
        flow.select_star(stars(2));
        flow.submit_rating();
        let effects = flow.on_rating_created(Ok(RatingCreatedResponse {
            success: true,
            message: None,
            rating: None,
        }));

        assert_eq!(effects, vec![Effect::success(RATING_SUBMITTED)]);
        assert_eq!(flow.step().submitted().map(|r| r.rating), Some(2));
    }

    #[test]
    fn test_already_rated_conflict_rechecks() {
        let mut flow = mounted(FlowOptions::default());
        flow.select_star(stars(4));
        flow.submit_rating();

        let effects = flow.on_rating_created(Err(ApiError::rejected(
            409,
            Some(ErrorCode::AlreadyRated),
            "You have already rated this listing",
        )));
        assert_eq!(
            effects,
            vec![
                Effect::info(ALREADY_RATED_CHECKING),
                Effect::Send(ApiRequest::LookupRatings {
                    listing_id: LISTING.to_string()
                })
            ]
        );
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_other_rating_failure_stays() {
        let mut flow = mounted(FlowOptions::default());
        flow.select_star(stars(4));
        flow.submit_rating();

        let effects = flow.on_rating_created(Err(ApiError::rejected(
            422,
            Some(ErrorCode::ValidationFailed),
            "Rating must be between 1 and 5",
        )));
        assert_eq!(
            notices(&effects),
            vec![Notice::error("Rating must be between 1 and 5")]
        );
        assert_eq!(flow.step().number(), 1);

        flow.submit_rating();
        let effects = flow.on_rating_created(Err(ApiError::rejected(500, None, "")));
        assert_eq!(notices(&effects), vec![Notice::error(RATING_FAILED)]);
    }

    #[test]
    fn test_existing_rating_is_not_posted_again() {
        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 3)]));

        // picker is locked once a rating is on record
        flow.select_star(stars(1));
        assert_eq!(flow.rating_label(), Some("Good - Met expectations"));

        let effects = flow.submit_rating();
        assert_eq!(effects, vec![Effect::info(ALREADY_RATED_MODIFY_REVIEW)]);
        assert_eq!(flow.step().number(), 2);
        assert_eq!(flow.step().submitted().map(|r| r.rating), Some(3));
    }

    #[test]
    fn test_continue_to_review_requires_existing_rating() {
        let mut flow = mounted(FlowOptions::default());
        flow.continue_to_review();
        assert_eq!(flow.step().number(), 1);

        let (mut flow, _) =
            RatingReviewFlow::mount(&learner_session(), context(), FlowOptions::default());
        flow.on_ratings_loaded(Ok(vec![rating(LEARNER, 3)]));
        flow.continue_to_review();
        assert_eq!(flow.step().number(), 2);
    }

    #[test]
    fn test_hover_preview_in_rating_step() {
        let mut flow = mounted(FlowOptions::default());
        flow.hover_star(stars(2));
        assert_eq!(flow.rating_label(), Some("Fair - Below expectations"));
        flow.leave_stars();
        assert_eq!(flow.rating_label(), None);
    }

    #[test]
    fn test_short_review_is_blocked_inline() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review("  too short  ");

        let effects = flow.submit_review();
        assert_eq!(
            notices(&effects),
            vec![Notice::error("Review must be at least 10 characters long")]
        );
        assert_eq!(
            flow.review_error(),
            Some("Review must be at least 10 characters long")
        );
        assert!(!flow.is_submitting());

        flow.edit_review("Long enough now");
        assert_eq!(flow.review_error(), None);
    }

    #[test]
    fn test_review_draft_is_capped() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review(&"a".repeat(REVIEW_MAX_CHARS + 20));
        assert_eq!(flow.review_counter().as_deref(), Some("500/500 characters"));
    }

    #[test]
    fn test_review_hint_and_counter() {
        let mut flow = in_review(FlowOptions::default());
        assert_eq!(flow.review_hint(), None);
        assert_eq!(flow.review_counter().as_deref(), Some("0/500 characters"));

        flow.edit_review("Nice");
        assert_eq!(flow.review_hint(), Some(REVIEW_MIN_HINT));
        assert!(!flow.can_submit_review());

        flow.edit_review("Nice teacher");
        assert_eq!(flow.review_hint(), None);
        assert!(flow.can_submit_review());
    }

    #[test]
    fn test_submit_review_sends_trimmed_text_and_prior_rating() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review("   Really patient teacher   ");

        let effects = flow.submit_review();
        assert_eq!(
            effects,
            vec![Effect::Send(ApiRequest::CreateReview(CreateReviewDto {
                learner_id: LEARNER.to_string(),
                teacher_id: TEACHER.to_string(),
                listing_id: LISTING.to_string(),
                review_text: "Really patient teacher".to_string(),
                rating: 4,
            }))]
        );
        assert!(flow.is_submitting());
        assert!(flow.submit_review().is_empty());
        assert!(flow.skip_review().is_empty());
        assert_eq!(flow.step().number(), 2);
    }

    #[test]
    fn test_review_success_returns_to_sessions_by_default() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review("Really patient teacher");
        flow.submit_review();

        let effects = flow.on_review_created(Ok(ReviewCreatedResponse {
            success: true,
            message: None,
            review: None,
        }));
        assert_eq!(
            effects,
            vec![
                Effect::success(REVIEW_SUBMITTED),
                Effect::Navigate(Route::LearnerSessions)
            ]
        );
        assert_eq!(flow.exited(), Some(&Route::LearnerSessions));
    }

    #[test]
    fn test_review_success_can_show_completion() {
        let options = FlowOptions {
            after_review: AfterReview::ShowCompletion,
        };
        let mut flow = in_review(options);
        flow.edit_review("Really patient teacher");
        flow.submit_review();

        let effects = flow.on_review_created(Ok(ReviewCreatedResponse {
            success: true,
            message: None,
            review: None,
        }));
        assert_eq!(effects, vec![Effect::success(REVIEW_SUBMITTED)]);
        assert_eq!(flow.step().number(), 3);
        assert!(flow.is_active());
    }

    #[test]
    fn test_already_reviewed_conflict_completes() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review("Really patient teacher");
        flow.submit_review();

        let effects = flow.on_review_created(Err(ApiError::rejected(
            409,
            Some(ErrorCode::AlreadyReviewed),
            "You have already reviewed this listing",
        )));
        assert_eq!(effects, vec![Effect::info(ALREADY_REVIEWED)]);
        assert_eq!(flow.step().number(), 3);
    }

    #[test]
    fn test_review_failure_stays_on_review() {
        let mut flow = in_review(FlowOptions::default());
        flow.edit_review("Really patient teacher");
        flow.submit_review();

        let effects = flow.on_review_created(Err(ApiError::rejected(500, None, "")));
        assert_eq!(notices(&effects), vec![Notice::error(REVIEW_FAILED)]);
        assert_eq!(flow.step().number(), 2);
        assert!(!flow.is_submitting());
    }

    #[test]
    fn test_skip_review_completes_without_request() {
        let mut flow = in_review(FlowOptions::default());
        assert!(flow.skip_review().is_empty());

        assert_eq!(flow.step().number(), 3);
        assert_eq!(flow.step().title(), "Thank You!");
        assert_eq!(flow.step().subtitle(), "Your feedback has been submitted");
    }

    #[test]
    fn test_back_to_sessions_from_any_step() {
        let mut flow = mounted(FlowOptions::default());
        assert_eq!(
            flow.back_to_sessions(),
            vec![Effect::Navigate(Route::LearnerSessions)]
        );
        assert!(flow.back_to_sessions().is_empty());
        assert!(flow.submit_rating().is_empty());
    }

    #[test]
    fn test_step_presentation() {
        let flow = mounted(FlowOptions::default());
        assert_eq!(flow.step().title(), "Rate Your Experience");
        assert_eq!(flow.step().subtitle(), "How was your learning session?");

        let flow = in_review(FlowOptions::default());
        assert_eq!(flow.step().title(), "Share Your Review (Optional)");
        assert_eq!(flow.rating_label(), Some("Very Good - Above expectations"));
    }

    #[test]
    fn test_notice_levels() {
        let mut flow = mounted(FlowOptions::default());
        let effects = flow.submit_rating();
        assert_eq!(notices(&effects)[0].level, NoticeLevel::Error);
    }
}
