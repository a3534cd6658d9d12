//! Primi engine: network IO for the draw-and-notify client.
//!
//! Two independent halves talk to the same server. The dispatch side POSTs
//! draw requests to `/images`; the subscribe side holds the `/primi` push
//! stream open and decodes its events. [`EngineHandle`] runs both on a
//! dedicated runtime thread behind plain channels.

mod dispatch;
mod engine;
mod sse;
mod subscribe;
mod types;

pub use dispatch::{DispatchSettings, DrawDispatcher, ReqwestDispatcher};
pub use engine::{EngineCommander, EngineHandle, EngineSettings};
pub use sse::{SseEvent, SseParser};
pub use subscribe::{ChannelEventSink, EventSink, SseSubscriber, SubscribeSettings, Subscriber};
pub use types::{
    ClientEvent, DispatchError, DispatchFailureKind, DrawMode, DrawRequest, ImagePayload,
    ServerEvent, StreamError, StreamFailureKind,
};
