use std::error::Error;

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::clock::{FrameLimiter, GameClock};
use crate::graphics::Canvas;
use crate::input::{EventTranslator, InputEvent};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub target_fps: u32,
}

/// The game side of the window loop.
///
/// Per frame, in order: every pending input event via `on_input`, one `tick`
/// with the frame's clock sample, then `draw` into the frame buffer. A `tick`
/// returning false closes the window after the current frame completes.
pub trait WindowApp: 'static {
    fn on_input(&mut self, event: InputEvent);
    fn tick(&mut self, now_ms: u64) -> bool;
    fn draw(&mut self, canvas: &mut Canvas<'_>);
}

pub fn run<A: WindowApp>(config: WindowConfig, mut app: A) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let surface_texture = {
        let size = window.inner_size();
        SurfaceTexture::new(size.width, size.height, &window)
    };
    let mut pixels = PixelsBuilder::new(config.width, config.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;

    let clock = GameClock::new();
    // With vsync on, presentation already paces the loop.
    let mut limiter = (!config.vsync).then(|| FrameLimiter::new(config.target_fps));
    let mut translator = EventTranslator::default();
    let (width, height) = (config.width, config.height);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                if let winit::event::WindowEvent::Resized(size) = &event {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        eprintln!("resize failed: {err}");
                    }
                }
                if let Some(input) = translator.translate(&event) {
                    app.on_input(input);
                }
            }
            Event::RedrawRequested(_) => {
                if !app.tick(clock.now_ms()) {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
                app.draw(&mut canvas);
                if let Err(err) = pixels.render() {
                    eprintln!("present failed: {err}");
                }

                if let Some(limiter) = limiter.as_mut() {
                    limiter.wait();
                }
            }
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
