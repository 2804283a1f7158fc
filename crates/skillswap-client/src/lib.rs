//! # SkillSwap Client
//!
//! The learner-facing rating and review flow, independent of any UI toolkit.
//!
//! - [`flow`]: [`RatingReviewFlow`], a synchronous state machine over
//!   [`RatingStep`]. Every user action or server response is a method call
//!   that returns the [`Effect`]s to perform.
//! - [`driver`]: [`FlowDriver`] performs those effects, sending requests
//!   through a [`FeedbackApi`] and handing notices and navigation to a
//!   [`FlowObserver`].
//! - [`api`]: the [`FeedbackApi`] seam and its reqwest implementation.
//! - [`session`]: the signed-in user and the context the flow is opened with.
//! - [`stars`]: the star picker widget state.
//!
//! # Example
//!
//! ```ignore
//! use skillswap_client::{ClientConfig, FlowContext, FlowDriver, FlowOptions, HttpFeedbackApi};
//!
//! let api = HttpFeedbackApi::new(&ClientConfig::from_env(), &session);
//! let context = FlowContext::for_listing(listing_id).with_teacher(teacher_id);
//! let mut driver = FlowDriver::mount(api, observer, &session, context, FlowOptions::default()).await;
//!
//! driver.flow_mut().select_star(Stars::new(4)?);
//! driver.submit_rating().await;
//! ```

pub mod api;
pub mod config;
pub mod driver;
pub mod effects;
pub mod flow;
pub mod session;
pub mod stars;

pub use api::{ApiError, FeedbackApi, HttpFeedbackApi};
pub use config::ClientConfig;
pub use driver::{FlowDriver, FlowObserver};
pub use effects::{ApiRequest, Effect, Notice, NoticeLevel, Route};
pub use flow::{AfterReview, FlowOptions, RatingReviewFlow, RatingStep};
pub use session::{
    CurrentUser, FlowContext, ListingRef, Role, Session, SessionData, SessionDetails,
};
pub use stars::StarPicker;

pub use skillswap_models::{Rating, Review, Stars};
