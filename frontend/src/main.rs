mod camera;
mod classifier;
mod components;
mod notify;
mod theme;

use std::collections::HashMap;

use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use shared::catalog::{CatalogItem, QUOTES};
use shared::session::SessionState;
use shared::{CaptureSession, Classification, Command, Frame, PointsLedger, ScanError, SessionId, SessionOutcome};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};
use yew::prelude::*;

use camera::CameraStream;
use components::utils::generate_id;
use notify::Toast;
use theme::Theme;

// Yew msg components
enum Msg {
    // Scan session
    StartScan,
    StreamAcquired(SessionId, CameraStream),
    AcquireFailed(SessionId, ScanError),
    Capture,
    FrameGrabbed(SessionId, Frame),
    FrameFailed(SessionId, ScanError),
    Classified(SessionId, Classification),
    ClassifyFailed(SessionId, ScanError),
    CancelScan,
    ManualAdd(&'static CatalogItem),
    ModelLoaded(Result<(), ScanError>),

    // UI states
    ToggleTheme,
    ThemeChanged(Theme),
    RotateQuote,
    SelectQuote(usize),
    DismissToast(u64),
}

// Main component: hosts the capture session, the points ledger, and the
// notification queue, and renders the landing page around them.
struct Model {
    ledger: PointsLedger,
    session: Option<CaptureSession>,
    stream: Option<CameraStream>,
    video_ref: NodeRef,
    canvas_ref: NodeRef,
    model_ready: bool,
    toasts: Vec<Toast>,
    toast_timers: HashMap<u64, Timeout>,
    theme: Theme,
    quote_index: usize,
    _quote_timer: Interval,
    _theme_listener: EventListener,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();

        // Start the one-time model load at mount so the first scan doesn't
        // pay for it.
        classifier::ensure_loaded(link.callback(Msg::ModelLoaded));

        let theme = theme::load();
        theme::apply(theme);

        let quote_timer = {
            let link = link.clone();
            Interval::new(5_000, move || link.send_message(Msg::RotateQuote))
        };

        Self {
            ledger: PointsLedger::new(),
            session: None,
            stream: None,
            video_ref: NodeRef::default(),
            canvas_ref: NodeRef::default(),
            model_ready: false,
            toasts: Vec::new(),
            toast_timers: HashMap::new(),
            theme,
            quote_index: 0,
            _quote_timer: quote_timer,
            _theme_listener: theme::watch(link.callback(Msg::ThemeChanged)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Scan session
            Msg::StartScan => self.handle_start_scan(ctx),
            Msg::StreamAcquired(id, stream) => self.handle_stream_acquired(ctx, id, stream),
            Msg::AcquireFailed(id, err) => self.session_event(ctx, id, |s| s.acquire_failed(err)),
            Msg::Capture => self.handle_capture(ctx),
            Msg::FrameGrabbed(id, frame) => self.session_event(ctx, id, |s| s.frame_grabbed(frame)),
            Msg::FrameFailed(id, err) => self.session_event(ctx, id, |s| s.frame_failed(err)),
            Msg::Classified(id, classification) => {
                self.session_event(ctx, id, |s| s.classified(&classification))
            }
            Msg::ClassifyFailed(id, err) => self.session_event(ctx, id, |s| s.classify_failed(err)),
            Msg::CancelScan => self.handle_cancel_scan(ctx),
            Msg::ManualAdd(item) => self.handle_manual_add(ctx, item),
            Msg::ModelLoaded(result) => self.handle_model_loaded(result),

            // UI states
            Msg::ToggleTheme => self.handle_set_theme(self.theme.toggled(), true),
            Msg::ThemeChanged(theme) => self.handle_set_theme(theme, false),
            Msg::RotateQuote => {
                self.quote_index = (self.quote_index + 1) % QUOTES.len();
                true
            }
            Msg::SelectQuote(index) => {
                self.quote_index = index % QUOTES.len();
                true
            }
            Msg::DismissToast(id) => self.handle_dismiss_toast(id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { components::header::render_header(self, ctx) }

                <main class="main-content">
                    { components::hero::render_hero(ctx) }
                    { components::hero::render_how_it_works() }
                    { components::points::render_points(self) }
                    { components::scanner::render_scanner(self, ctx) }
                    { components::leaderboard::render_leaderboard() }
                    { components::rewards::render_rewards() }
                    { components::quotes::render_quotes(self, ctx) }
                    { components::hero::render_stats() }
                </main>

                <footer class="app-footer">
                    <p>{"© 2025 Eco Recycle Reward · Recycle. Earn. Repeat."}</p>
                </footer>

                { components::toasts::render_toasts(self, ctx) }
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        // The <video> element only exists once the Live state has rendered;
        // attach the stream to it here instead of racing the DOM.
        self.attach_preview();
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }
}

// Session handling
impl Model {
    fn scan_in_progress(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_terminal())
    }

    fn session_state(&self) -> Option<&SessionState> {
        self.session.as_ref().map(|s| s.state())
    }

    fn requesting_camera(&self) -> bool {
        matches!(self.session_state(), Some(SessionState::Requesting))
    }

    fn camera_open(&self) -> bool {
        matches!(
            self.session_state(),
            Some(SessionState::Live | SessionState::Capturing)
        )
    }

    fn detecting(&self) -> bool {
        matches!(self.session_state(), Some(SessionState::Capturing))
    }

    fn handle_start_scan(&mut self, ctx: &Context<Self>) -> bool {
        if self.scan_in_progress() {
            return false;
        }
        let mut session = CaptureSession::new(generate_id());
        let commands = session.start();
        self.session = Some(session);
        self.run_commands(ctx, commands);
        true
    }

    fn handle_stream_acquired(
        &mut self,
        ctx: &Context<Self>,
        id: SessionId,
        mut stream: CameraStream,
    ) -> bool {
        if self.session.as_ref().map(|s| s.id()) != Some(id) {
            // Stream for a session that no longer exists; stop it now.
            stream.release();
            return false;
        }
        // Adopt the stream before feeding the machine so that a Release
        // emitted for a cancelled session stops this very stream.
        self.stream = Some(stream);
        self.session_event(ctx, id, |s| s.stream_acquired())
    }

    fn handle_capture(&mut self, ctx: &Context<Self>) -> bool {
        let Some(id) = self.session.as_ref().map(|s| s.id()) else {
            return false;
        };
        self.session_event(ctx, id, |s| s.capture())
    }

    fn handle_cancel_scan(&mut self, ctx: &Context<Self>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let commands = session.cancel();
        self.run_commands(ctx, commands);
        true
    }

    fn handle_manual_add(&mut self, ctx: &Context<Self>, item: &'static CatalogItem) -> bool {
        if self.scan_in_progress() {
            return false;
        }
        let mut session = CaptureSession::new(generate_id());
        let commands = session.manual_add(item);
        self.session = Some(session);
        self.run_commands(ctx, commands);
        true
    }

    fn handle_model_loaded(&mut self, result: Result<(), ScanError>) -> bool {
        match result {
            Ok(()) => {
                self.model_ready = true;
                true
            }
            Err(err) => {
                log::error!("classifier unavailable: {err}");
                false
            }
        }
    }

    /// Applies a session event to the current session if the id still
    /// matches, then executes whatever commands it emits. Completions
    /// addressed to a torn-down session are dropped.
    fn session_event(
        &mut self,
        ctx: &Context<Self>,
        id: SessionId,
        apply: impl FnOnce(&mut CaptureSession) -> Vec<Command>,
    ) -> bool {
        let commands = match self.session.as_mut().filter(|s| s.id() == id) {
            Some(session) => apply(session),
            None => {
                log::warn!("dropping completion for stale session {id}");
                return false;
            }
        };
        self.run_commands(ctx, commands);
        true
    }

    fn run_commands(&mut self, ctx: &Context<Self>, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Acquire => self.spawn_acquire(ctx),
                Command::GrabFrame => self.spawn_grab_frame(ctx),
                Command::Classify(frame) => self.spawn_classify(ctx, frame),
                Command::Release => self.release_stream(),
                Command::Notify(outcome) => self.handle_outcome(ctx, &outcome),
            }
        }
    }

    fn spawn_acquire(&self, ctx: &Context<Self>) {
        let Some(id) = self.session.as_ref().map(|s| s.id()) else {
            return;
        };
        let link = ctx.link().clone();
        spawn_local(async move {
            match camera::acquire().await {
                Ok(stream) => link.send_message(Msg::StreamAcquired(id, stream)),
                Err(err) => link.send_message(Msg::AcquireFailed(id, err)),
            }
        });
    }

    fn spawn_grab_frame(&self, ctx: &Context<Self>) {
        let Some(id) = self.session.as_ref().map(|s| s.id()) else {
            return;
        };
        let video = self.video_ref.cast::<HtmlVideoElement>();
        let canvas = self.canvas_ref.cast::<HtmlCanvasElement>();
        let link = ctx.link().clone();
        spawn_local(async move {
            let (Some(video), Some(canvas)) = (video, canvas) else {
                link.send_message(Msg::FrameFailed(id, ScanError::NotReady));
                return;
            };
            let result = match camera::wait_for_frame(&video).await {
                Ok(()) => camera::grab_frame(&video, &canvas),
                Err(err) => Err(err),
            };
            match result {
                Ok(frame) => link.send_message(Msg::FrameGrabbed(id, frame)),
                Err(err) => link.send_message(Msg::FrameFailed(id, err)),
            }
        });
    }

    fn spawn_classify(&self, ctx: &Context<Self>, frame: Frame) {
        let Some(id) = self.session.as_ref().map(|s| s.id()) else {
            return;
        };
        let link = ctx.link().clone();
        spawn_local(async move {
            match classifier::classify(&frame).await {
                Ok(classification) => link.send_message(Msg::Classified(id, classification)),
                Err(err) => link.send_message(Msg::ClassifyFailed(id, err)),
            }
        });
    }

    fn release_stream(&mut self) {
        if let Some(video) = self.video_ref.cast::<HtmlVideoElement>() {
            video.pause().ok();
            video.set_src_object(None);
        }
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }

    /// Terminal outcome: mutate the ledger for credited outcomes and queue
    /// exactly one toast. This runs once per session because the machine
    /// emits Notify only on the single transition into a terminal state.
    fn handle_outcome(&mut self, ctx: &Context<Self>, outcome: &SessionOutcome) {
        if let Some(credited) = outcome.credited() {
            let delta = self.ledger.apply(credited);
            log::info!("ledger +{delta} (total {})", self.ledger.total());
        }
        self.push_toast(ctx, notify::toast_for(generate_id(), outcome));
    }

    fn push_toast(&mut self, ctx: &Context<Self>, toast: Toast) {
        let id = toast.id;
        let link = ctx.link().clone();
        let timer = Timeout::new(notify::TOAST_MS, move || {
            link.send_message(Msg::DismissToast(id));
        });
        self.toast_timers.insert(id, timer);
        self.toasts.push(toast);
    }

    fn handle_dismiss_toast(&mut self, id: u64) -> bool {
        self.toast_timers.remove(&id);
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    fn handle_set_theme(&mut self, theme: Theme, persist: bool) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        theme::apply(theme);
        if persist {
            theme::store(theme);
        }
        true
    }

    fn attach_preview(&self) {
        if !self.camera_open() {
            return;
        }
        let (Some(stream), Some(video)) = (
            self.stream.as_ref(),
            self.video_ref.cast::<HtmlVideoElement>(),
        ) else {
            return;
        };
        if video.src_object().is_some() {
            return;
        }
        video.set_src_object(Some(stream.media_stream()));
        video.set_muted(true);
        if let Err(err) = video.play() {
            log::warn!("video play rejected: {:?}", err);
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
