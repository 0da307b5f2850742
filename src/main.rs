//! Slide Deck entry point
//!
//! Binds the deck and the particle background to the page and runs the
//! animation loop. The native build runs a headless smoke test instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_deck {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, HtmlButtonElement,
        HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
    };

    use slide_deck::particles::{self, FrameClock, ParticleField, Rgba, Surface};
    use slide_deck::{DeckCommand, DeckConfig, DeckError, SlideController, WheelGate};

    /// Deck controller plus the DOM it drives
    struct Deck {
        controller: SlideController,
        wheel: WheelGate,
        slides: Vec<Element>,
        indicators: Vec<Element>,
        progress_bar: HtmlElement,
        prev_btn: HtmlButtonElement,
        next_btn: HtmlButtonElement,
    }

    impl Deck {
        /// Route a command through the controller and repaint on success
        fn apply(&mut self, command: DeckCommand) {
            if self.controller.apply(command, js_sys::Date::now()).is_some() {
                self.sync_dom();
            }
        }

        fn on_wheel(&mut self, delta_y: f64) {
            if let Some(command) = self.wheel.filter(delta_y, js_sys::Date::now()) {
                self.apply(command);
            }
        }

        /// Mirror controller state into classes, progress bar and buttons
        fn sync_dom(&self) {
            let current = self.controller.current();

            for (i, slide) in self.slides.iter().enumerate() {
                let classes = slide.class_list();
                let _ = classes.remove_3("active", "prev", "next");
                let _ = classes.add_1(self.controller.placement(i).class_name());
            }

            for (i, indicator) in self.indicators.iter().enumerate() {
                let _ = indicator
                    .class_list()
                    .toggle_with_force("active", i == current);
            }

            let width = format!("{}%", self.controller.progress() * 100.0);
            let _ = self.progress_bar.style().set_property("width", &width);

            self.prev_btn.set_disabled(!self.controller.has_prev());
            self.next_btn.set_disabled(!self.controller.has_next());
        }
    }

    /// Particle field plus its canvas
    struct Background {
        field: ParticleField,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        animate: bool,
    }

    impl Background {
        fn resize_to_window(&mut self, window: &Window) {
            let (w, h) = window_size(window);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.field.resize(w, h);
        }

        fn frame(&mut self, time: f64) {
            for _ in 0..self.clock.advance(time) {
                self.field.step();
            }
            self.draw();
        }

        fn draw(&self) {
            particles::draw(&self.field, &mut CanvasSurface(&self.ctx));
        }
    }

    /// Canvas 2D backend for the particle drawing pass
    struct CanvasSurface<'a>(&'a CanvasRenderingContext2d);

    impl Surface for CanvasSurface<'_> {
        fn clear(&mut self, width: f32, height: f32) {
            self.0.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn fill_circle(&mut self, center: glam::Vec2, radius: f32, color: Rgba) {
            self.0.set_fill_style_str(&color.to_string());
            self.0.begin_path();
            let _ = self.0.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.0.fill();
        }

        fn stroke_line(&mut self, from: glam::Vec2, to: glam::Vec2, width: f32, color: Rgba) {
            self.0.set_stroke_style_str(&color.to_string());
            self.0.set_line_width(width as f64);
            self.0.begin_path();
            self.0.move_to(from.x as f64, from.y as f64);
            self.0.line_to(to.x as f64, to.y as f64);
            self.0.stroke();
        }
    }

    fn window_size(window: &Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, DeckError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| DeckError::MissingElement(format!("#{}", id)))?
            .dyn_into::<T>()
            .map_err(|_| DeckError::WrongElementType(format!("#{}", id)))
    }

    fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, DeckError> {
        let list = document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Slide Deck starting...");

        if let Err(e) = start() {
            log::error!("Slide Deck failed to start: {}", e);
        }
    }

    fn start() -> Result<(), DeckError> {
        let window = web_sys::window().ok_or(DeckError::NoWindow)?;
        let document = window.document().ok_or(DeckError::NoDocument)?;

        if document.ready_state() == "loading" {
            let closure = Closure::once(move |_event: web_sys::Event| on_ready());
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        } else {
            on_ready();
        }
        Ok(())
    }

    fn on_ready() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let config = DeckConfig::load();

        match setup_deck(&window, &document, &config) {
            Ok(deck) => {
                schedule_first_slide(&window, deck, config.initial_delay_ms);
            }
            Err(e) => log::error!("Deck controls unavailable: {}", e),
        }

        if let Err(e) = setup_background(&window, &document, &config) {
            log::warn!("Particle background disabled: {}", e);
        }

        log::info!("Slide Deck running!");
    }

    fn setup_deck(
        window: &Window,
        document: &Document,
        config: &DeckConfig,
    ) -> Result<Rc<RefCell<Deck>>, DeckError> {
        let slides = query_all(document, ".slide")?;
        let container: Element = element_by_id(document, "indicators")?;
        let progress_bar: HtmlElement = element_by_id(document, "progressBar")?;
        let prev_btn: HtmlButtonElement = element_by_id(document, "prevBtn")?;
        let next_btn: HtmlButtonElement = element_by_id(document, "nextBtn")?;

        let mut indicators = Vec::with_capacity(slides.len());
        for i in 0..slides.len() {
            let indicator = document.create_element("div")?;
            indicator.class_list().add_1("indicator")?;
            if i == 0 {
                indicator.class_list().add_1("active")?;
            }
            container.append_child(&indicator)?;
            indicators.push(indicator);
        }

        log::info!("Found {} slides", slides.len());

        let deck = Rc::new(RefCell::new(Deck {
            controller: SlideController::with_cooldown(slides.len(), config.transition_ms),
            wheel: WheelGate::new(config.wheel_interval_ms, config.wheel_min_delta),
            slides,
            indicators,
            progress_bar,
            prev_btn,
            next_btn,
        }));

        setup_deck_handlers(window, &deck)?;
        Ok(deck)
    }

    fn setup_deck_handlers(window: &Window, deck: &Rc<RefCell<Deck>>) -> Result<(), DeckError> {
        // Indicator dots
        let indicators = deck.borrow().indicators.clone();
        for (i, indicator) in indicators.iter().enumerate() {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                deck.borrow_mut().apply(DeckCommand::GoTo(i));
            });
            indicator.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Prev / next buttons
        let (prev_btn, next_btn) = {
            let d = deck.borrow();
            (d.prev_btn.clone(), d.next_btn.clone())
        };
        for (btn, command) in [(prev_btn, DeckCommand::Prev), (next_btn, DeckCommand::Next)] {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                deck.borrow_mut().apply(command);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let on_link = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|el| el.tag_name() == "A");
                if let Some(command) = slide_deck::deck::command_for_key(&event.key(), on_link) {
                    deck.borrow_mut().apply(command);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Wheel (passive, we never prevent scrolling)
        {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                deck.borrow_mut().on_wheel(event.delta_y());
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn schedule_first_slide(window: &Window, deck: Rc<RefCell<Deck>>, delay_ms: i32) {
        let closure = Closure::once(move || {
            deck.borrow_mut().apply(DeckCommand::GoTo(0));
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            log::warn!("Could not schedule first slide: {:?}", e);
        }
        closure.forget();
    }

    fn setup_background(
        window: &Window,
        document: &Document,
        config: &DeckConfig,
    ) -> Result<(), DeckError> {
        if !config.particles {
            log::info!("Particle background turned off");
            return Ok(());
        }

        let Some(canvas) = document.get_element_by_id("particle-canvas") else {
            log::info!("No #particle-canvas, skipping background");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = canvas
            .dyn_into()
            .map_err(|_| DeckError::WrongElementType("#particle-canvas".into()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(DeckError::NoCanvasContext)?
            .dyn_into()
            .map_err(|_| DeckError::NoCanvasContext)?;

        let reduced_motion = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches());
        let animate = config.animate_particles(reduced_motion);
        if !animate {
            log::info!("Reduced motion requested, background will not animate");
        }

        let (w, h) = window_size(window);
        let seed = js_sys::Date::now() as u64;
        let background = Rc::new(RefCell::new(Background {
            field: ParticleField::new(config.particle_config(), w, h, seed),
            clock: FrameClock::new(),
            canvas,
            ctx,
            animate,
        }));
        background.borrow_mut().resize_to_window(window);

        log::info!(
            "Particle background: {} particles ({} density), seed {}",
            config.particle_config().count,
            config.density.as_str(),
            seed
        );

        setup_background_handlers(window, &background)?;

        if animate {
            request_animation_frame(background);
        } else {
            background.borrow().draw();
        }
        Ok(())
    }

    fn setup_background_handlers(
        window: &Window,
        background: &Rc<RefCell<Background>>,
    ) -> Result<(), DeckError> {
        // Resize
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let mut bg = background.borrow_mut();
                bg.resize_to_window(&window);
                if !bg.animate {
                    bg.draw();
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer position
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                background
                    .borrow_mut()
                    .field
                    .set_pointer(event.client_x() as f32, event.client_y() as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer left the window
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.related_target().is_none() {
                    background.borrow_mut().field.clear_pointer();
                }
            });
            window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(background: Rc<RefCell<Background>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            animation_loop(background, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(background: Rc<RefCell<Background>>, time: f64) {
        background.borrow_mut().frame(time);
        request_animation_frame(background);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_deck::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Slide Deck (native) starting...");
    log::info!("The deck runs in the browser - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the deck and the background without a browser and log a summary
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use glam::Vec2;
    use slide_deck::deck::command_for_key;
    use slide_deck::particles::{self, FrameClock, ParticleField, Rgba, Surface};
    use slide_deck::{DeckConfig, SlideController, WheelGate};

    /// Counts draw calls instead of drawing
    #[derive(Default)]
    struct CountingSurface {
        circles: usize,
        lines: usize,
    }

    impl Surface for CountingSurface {
        fn clear(&mut self, _width: f32, _height: f32) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgba) {
            self.circles += 1;
        }
        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgba) {
            self.lines += 1;
        }
    }

    let config = DeckConfig::load();

    // Deck: a burst of key presses, then a trackpad flick
    let mut deck = SlideController::with_cooldown(8, config.transition_ms);
    let mut wheel = WheelGate::new(config.wheel_interval_ms, config.wheel_min_delta);
    let mut accepted = 0;
    let keys = ["ArrowRight", "ArrowRight", " ", "Enter", "ArrowLeft"];
    for (i, key) in keys.iter().enumerate() {
        let now = i as f64 * 400.0;
        if let Some(command) = command_for_key(key, false) {
            accepted += deck.apply(command, now).is_some() as usize;
        }
    }
    for i in 0..40 {
        let now = 3000.0 + i as f64 * 16.0;
        if let Some(command) = wheel.filter(35.0, now) {
            accepted += deck.apply(command, now).is_some() as usize;
        }
    }
    log::info!(
        "Deck: {} transitions accepted, on slide {}/{} ({:.0}%)",
        accepted,
        deck.current() + 1,
        deck.count(),
        deck.progress() * 100.0
    );

    // Background: five seconds at 60 Hz with the pointer parked mid-screen
    let mut field = ParticleField::new(config.particle_config(), 1280.0, 720.0, 0x5eed);
    field.set_pointer(640.0, 360.0);
    let mut clock = FrameClock::new();
    let mut steps = 0;
    for frame in 0..300 {
        for _ in 0..clock.advance(frame as f64 * 1000.0 / 60.0) {
            field.step();
            steps += 1;
        }
    }
    let mut surface = CountingSurface::default();
    particles::draw(&field, &mut surface);
    log::info!(
        "Background ({} density): {} steps, {} particles, {} links",
        config.density.as_str(),
        steps,
        surface.circles,
        surface.lines
    );

    println!("✓ Headless run complete");
}
