mod audio;
mod cli;
mod playlist;
mod renderer;
mod transport;
mod ui;
mod utils;

use clap::Parser;
use nannou::prelude::*;
use rodio::OutputStream;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use audio::{RodioLoader, SmoothedBands, SpectrumAnalyzer};
use cli::Args;
use playlist::{display_name, Playlist, DEFAULT_ASSETS_DIR};
use renderer::{Renderer, CANVAS_SIZE};
use transport::{Transport, TransportView, SKIP_SECONDS};
use ui::bindings::{parse_key, Action, VOLUME_STEP};
use ui::{bar_rect, canvas_rect, Control, HelpOverlay, Slider, TransportBar, BAR_HEIGHT};
use utils::Config;

fn main() {
    utils::logging::init();

    let args = Args::parse().install();
    if args.list_devices {
        audio::list_output_devices();
        return;
    }

    nannou::app(model).update(update).run();
}

struct Model {
    /// Keeps the output device open for the lifetime of the app
    _output: Option<OutputStream>,
    transport: Transport<RodioLoader>,
    analyzer: SpectrumAnalyzer,
    bands: SmoothedBands,
    renderer: Renderer,
    bar: TransportBar,
    help_overlay: HelpOverlay,
    playlist: Playlist,
    track_names: Vec<String>,
    frame_count: u64,
}

fn model(app: &App) -> Model {
    let args = Args::installed();
    let config = Config::load();

    app.new_window()
        .title("halo-player")
        .size(CANVAS_SIZE as u32, (CANVAS_SIZE + BAR_HEIGHT) as u32)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .build()
        .unwrap();

    let (output, loader) = match audio::open_output(config.output_device.as_deref()) {
        Ok((stream, handle)) => (Some(stream), RodioLoader::new(Some(handle))),
        Err(e) => {
            error!("No audio output, playback disabled: {:#}", e);
            (None, RodioLoader::new(None))
        }
    };

    let assets_dir = args
        .assets
        .clone()
        .or_else(|| config.assets_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
    let playlist = Playlist::discover(&args.tracks, config.tracks.as_deref(), &assets_dir);
    info!("{} track(s) available", playlist.len());

    let volume = args.volume.unwrap_or_else(|| config.volume());
    let mut bar = TransportBar::new(bar_rect(app.window_rect()), volume);
    let mut transport = Transport::new(loader);

    if let Some(path) = playlist.current() {
        bar.set_track_name(display_name(path));
        transport.load_initial(path, &mut bar);
    } else {
        warn!("No track to load");
    }

    let track_names = playlist.tracks().iter().map(|p| display_name(p)).collect();

    Model {
        _output: output,
        transport,
        analyzer: SpectrumAnalyzer::new(),
        bands: SmoothedBands::new(),
        renderer: Renderer::new(),
        bar,
        help_overlay: HelpOverlay::new(),
        playlist,
        track_names,
        frame_count: 0,
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    model.frame_count += 1;
    model.bar.set_bounds(bar_rect(app.window_rect()));

    if model.transport.poll_loads(&mut model.bar) {
        model.analyzer.set_input(model.transport.output());
        if !model.transport.is_ready() {
            if let Some(path) = model.transport.track_path() {
                model
                    .bar
                    .set_track_name(format!("{} (failed to load)", display_name(path)));
            }
        }
    }

    model.transport.update_frame(&mut model.bar);

    if model.transport.is_ready() {
        let raw = model.analyzer.analyze(model.transport.is_playing());
        model.bands.update(&raw);
    }

    model.renderer.update(model.bands, model.frame_count);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let bounds = app.window_rect();

    draw.background().color(BLACK);
    model.renderer.draw(&draw, canvas_rect(bounds));
    model.bar.draw(&draw);
    model
        .help_overlay
        .draw(
            &draw,
            canvas_rect(bounds),
            &model.track_names,
            model.playlist.current_index(),
        );

    draw.to_frame(app, &frame).unwrap();
}

fn switch_track(model: &mut Model, path: &Path) {
    model.bar.set_track_name(display_name(path));
    model.transport.select_track(path, &mut model.bar);
    model.analyzer.set_input(model.transport.output());
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let Some(action) = parse_key(key, model.help_overlay.visible) else {
        return;
    };

    match action {
        Action::Quit => app.quit(),
        Action::ToggleHelp => model.help_overlay.toggle(),
        Action::CloseHelp => model.help_overlay.hide(),
        Action::TogglePlay => model.transport.toggle_play(&mut model.bar),
        Action::SkipBack => model.transport.skip(-SKIP_SECONDS),
        Action::SkipForward => model.transport.skip(SKIP_SECONDS),
        Action::VolumeUp | Action::VolumeDown => {
            let step = if action == Action::VolumeUp {
                VOLUME_STEP
            } else {
                -VOLUME_STEP
            };
            let volume = model.bar.volume() + step;
            model.bar.set_volume(volume);
            model.transport.set_volume(model.bar.volume());
        }
        Action::NextTrack | Action::PrevTrack | Action::SelectTrack(_) => {
            let path = match action {
                Action::NextTrack => model.playlist.next(),
                Action::PrevTrack => model.playlist.prev(),
                Action::SelectTrack(idx) => model.playlist.select(idx),
                _ => None,
            }
            .map(Path::to_path_buf);

            if let Some(path) = path {
                switch_track(model, &path);
            }
        }
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let pos = app.mouse.position();

    match model.bar.hit(pos) {
        Some(Control::Play) => model.transport.toggle_play(&mut model.bar),
        Some(Control::Back) => model.transport.skip(-SKIP_SECONDS),
        Some(Control::Forward) => model.transport.skip(SKIP_SECONDS),
        Some(Control::Seek) => {
            let fraction = model.bar.begin_drag(Slider::Seek, pos.x);
            model.transport.seek_drag(fraction, &mut model.bar);
        }
        Some(Control::Volume) => {
            let volume = model.bar.begin_drag(Slider::Volume, pos.x);
            model.transport.set_volume(volume);
        }
        None => {}
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    match model.bar.drag_to(pos.x) {
        Some((Slider::Seek, fraction)) => model.transport.seek_drag(fraction, &mut model.bar),
        Some((Slider::Volume, volume)) => model.transport.set_volume(volume),
        None => {}
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    if let Some((Slider::Seek, fraction)) = model.bar.end_drag() {
        model.transport.end_seek(fraction);
    }
}
