use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use viewpoint_engine::coords::Vec2;
use viewpoint_engine::text::FontId;
use viewpoint_model::{CameraControlHpr, CameraControlPosition, Signal, Subscription, Triple, format_triple};
use viewpoint_ui::prelude::*;

use crate::script::{self, Command, Target};

// ── Studio ────────────────────────────────────────────────────────────────

/// Builder for a headless studio session.
///
/// # Example
/// ```rust,ignore
/// Studio::new()
///     .title("Viewpoint Studio")
///     .size(720.0, 420.0)
///     .font(load_font())
///     .angles([0.0, -30.0, 0.0])
///     .script("set hpr.heading 45\nprint")
///     .run()?;
/// ```
pub struct Studio {
    title: String,
    viewport: Vec2,
    fonts: Vec<Vec<u8>>,
    angles: Triple,
    coord: Triple,
    script: String,
}

impl Studio {
    pub fn new() -> Self {
        Self {
            title: "Viewpoint Studio".to_string(),
            viewport: Vec2::new(720.0, 420.0),
            fonts: Vec::new(),
            angles: [0.0; 3],
            coord: [0.0; 3],
            script: String::new(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    /// Register font bytes. The first loaded font is used for all text; an
    /// empty buffer is skipped.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.fonts.push(data);
        self
    }

    /// Initial camera orientation. Clamped like any other write.
    pub fn angles(mut self, t: Triple) -> Self {
        self.angles = t;
        self
    }

    pub fn coord(mut self, t: Triple) -> Self {
        self.coord = t;
        self
    }

    pub fn script(mut self, src: impl Into<String>) -> Self {
        self.script = src.into();
        self
    }

    /// Parse the script and run it against a fresh session.
    pub fn run(self) -> Result<()> {
        let steps = script::parse(&self.script).context("parsing studio script")?;
        let title = self.title.clone();
        let mut session = self.into_session()?;
        log::info!("{title}: running {} command(s)", steps.len());
        for step in &steps {
            session
                .apply(&step.command)
                .with_context(|| format!("script line {}", step.line))?;
        }
        Ok(())
    }

    fn into_session(self) -> Result<Session> {
        let mut ui = UiScene::new();
        let mut font = FontId::fallback();
        for (i, data) in self.fonts.iter().enumerate() {
            if data.is_empty() {
                log::warn!("font #{i} is empty; text is measured with fixed metrics");
                continue;
            }
            let id = ui.load_font(data).with_context(|| format!("loading font #{i}"))?;
            if ui.font_system.font_count() == 1 {
                font = id;
            }
        }
        Ok(Session::new(ui, font, self.viewport, self.angles, self.coord))
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

// ── Session ───────────────────────────────────────────────────────────────

/// Live controls, their cells, and the widget tree showing them.
pub struct Session {
    ui: UiScene,
    viewport: Vec2,
    root: Element,
    hpr: Rc<RefCell<CameraControlHpr>>,
    position: Rc<RefCell<CameraControlPosition>>,
    scene: SceneView,
    /// Lines written by `print`, in order.
    pub transcript: Vec<String>,
    _watchers: Vec<Subscription>,
}

impl Session {
    pub fn new(ui: UiScene, font: FontId, viewport: Vec2, angles: Triple, coord: Triple) -> Self {
        let hpr = Rc::new(RefCell::new(CameraControlHpr::new()));
        let position = Rc::new(RefCell::new(CameraControlPosition::new()));

        let angles_cell = {
            let mut c = hpr.borrow_mut();
            c.set_angle_values(angles);
            let cell = Signal::new(c.angles());
            c.attach_signal(Rc::new(cell.clone()));
            c.add_listener(|ev| log::info!("{}", ev.to_json()));
            cell
        };
        let coord_cell = {
            let mut c = position.borrow_mut();
            c.set_coord_values(coord);
            let cell = Signal::new(c.coord());
            c.attach_signal(Rc::new(cell.clone()));
            c.add_listener(|ev| log::info!("{}", ev.to_json()));
            cell
        };

        let watchers = vec![
            angles_cell.watch(|t| log::debug!("angles cell = {}", format_triple(t))),
            coord_cell.watch(|t| log::debug!("coord cell = {}", format_triple(t))),
        ];

        let root = Row::new()
            .spacing(16.0)
            .child(
                Column::new()
                    .spacing(12.0)
                    .child(HprPanel::new(hpr.clone(), font))
                    .child(PositionPanel::new(position.clone(), font)),
            )
            .child(SceneView::new(font).angles(angles_cell.clone()).coord(coord_cell.clone()))
            .into();
        let scene = SceneView::new(font).angles(angles_cell).coord(coord_cell);

        Self {
            ui,
            viewport,
            root,
            hpr,
            position,
            scene,
            transcript: Vec::new(),
            _watchers: watchers,
        }
    }

    pub fn hpr(&self) -> Triple {
        self.hpr.borrow().angles()
    }

    pub fn coord(&self) -> Triple {
        self.position.borrow().coord()
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Set { target, value } => {
                self.set(*target, value);
                Ok(())
            }
            Command::Drag { target, fraction } => self.drag(*target, *fraction),
            Command::Frame => {
                let n = self.render(UiInput::default());
                log::info!("frame: {n} draw command(s)");
                Ok(())
            }
            Command::Print => {
                for line in self.scene.lines() {
                    println!("{line}");
                    self.transcript.push(line);
                }
                Ok(())
            }
        }
    }

    fn set(&mut self, target: Target, value: &serde_json::Value) {
        let changed = match target {
            Target::HprAngles => self.hpr.borrow_mut().set_angles(value),
            Target::HprHeading => self.hpr.borrow_mut().set_heading(value.clone()),
            Target::HprPitch => self.hpr.borrow_mut().set_pitch(value.clone()),
            Target::HprRoll => self.hpr.borrow_mut().set_roll(value.clone()),
            Target::PositionCoord => self.position.borrow_mut().set_coord(value),
            Target::PositionLat => self.position.borrow_mut().set_lat(value.clone()),
            Target::PositionLng => self.position.borrow_mut().set_lng(value.clone()),
            Target::PositionAlt => self.position.borrow_mut().set_alt(value.clone()),
        };
        if !changed {
            log::info!("set {target} {value}: no change");
        }
    }

    /// Press on the far side of the track, move to `fraction`, release.
    fn drag(&mut self, target: Target, fraction: f32) -> Result<()> {
        self.render(UiInput::default());
        let id = target.as_str();
        let track = self
            .ui
            .region(id)
            .with_context(|| format!("no slider laid out for `{id}`"))?;

        let y = track.center().y;
        let from = Vec2::new(track.x_at(if fraction < 0.5 { 1.0 } else { 0.0 }), y);
        let to = Vec2::new(track.x_at(fraction), y);
        log::debug!("drag {id} from x={} to x={}", from.x, to.x);

        self.render(UiInput::pressed(from));
        self.render(UiInput::pressed(to));
        self.render(UiInput::hover(to));
        Ok(())
    }

    fn render(&mut self, input: UiInput) -> usize {
        self.ui.frame(&mut self.root, self.viewport, &input).len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn session() -> Session {
        Session::new(UiScene::new(), FontId::fallback(), Vec2::new(720.0, 420.0), [10.0, 20.0, 30.0], [0.0; 3])
    }

    #[test]
    fn set_commands_go_through_the_setters() {
        let mut s = session();
        s.apply(&Command::Set { target: Target::HprHeading, value: json!(400) }).unwrap();
        s.apply(&Command::Set { target: Target::PositionLat, value: json!("91") }).unwrap();
        assert_eq!(s.hpr(), [180.0, 20.0, 30.0]);
        assert_eq!(s.coord(), [90.0, 0.0, 0.0]);

        s.apply(&Command::Set { target: Target::PositionCoord, value: json!([1, 2]) }).unwrap();
        assert_eq!(s.coord(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn print_reads_the_cells() {
        let mut s = session();
        s.apply(&Command::Set { target: Target::HprPitch, value: json!("abc") }).unwrap();
        s.apply(&Command::Print).unwrap();
        assert_eq!(s.transcript, ["Scene", "Camera HPR: [10,20,30]", "Camera position: [0,0,0]"]);
    }

    #[test]
    fn drag_moves_the_slider_and_the_model() {
        let mut s = session();
        s.apply(&Command::Drag { target: Target::PositionLng, fraction: 0.25 }).unwrap();
        assert_eq!(s.coord(), [0.0, -90.0, 0.0]);

        s.apply(&Command::Drag { target: Target::HprHeading, fraction: 1.0 }).unwrap();
        assert_eq!(s.hpr(), [180.0, 20.0, 30.0]);

        s.apply(&Command::Print).unwrap();
        assert_eq!(s.transcript[1], "Camera HPR: [180,20,30]");
        assert_eq!(s.transcript[2], "Camera position: [0,-90,0]");
    }

    #[test]
    fn initial_values_are_clamped() {
        let s = Session::new(UiScene::new(), FontId::fallback(), Vec2::new(720.0, 420.0), [0.0; 3], [95.0, 0.0, 5000.0]);
        assert_eq!(s.coord(), [90.0, 0.0, 1000.0]);
    }

    #[test]
    fn run_reports_script_errors_with_position() {
        let err = Studio::new().script("frame\nset hpr.heading").run().unwrap_err();
        let script_err = err.downcast_ref::<script::ScriptError>().expect("script error");
        assert_eq!(script_err.line, 2);
    }

    #[test]
    fn run_executes_the_bundled_demo() {
        Studio::new().script(include_str!("../scripts/demo.vps")).run().unwrap();
    }
}
