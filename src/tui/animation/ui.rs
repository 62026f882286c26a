// src/tui/animation/ui.rs
use super::state::AnimationApp;
use crate::animate::{Panel, Scene};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line as TextLine,
    widgets::canvas::{Canvas, Circle, Line, Points},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BOUNDS: [f64; 2] = [-1.15, 1.15];

#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, scene: &Scene, app: &AnimationApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, scene.rows.max(1) as u32); scene.rows])
        .split(chunks[0]);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, scene.cols.max(1) as u32); scene.cols])
            .split(*row_area);
        for (c, area) in cols.iter().enumerate() {
            if let Some(panel) = scene.panel(r, c) {
                draw_panel(f, scene, panel, app.frame, *area);
            }
        }
    }

    let footer = Paragraph::new(TextLine::from(app.status()))
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(footer, chunks[1]);
}

fn draw_panel(f: &mut Frame, scene: &Scene, panel: &Panel, frame: usize, area: Rect) {
    let Some(sg) = scene.graph_of(panel) else {
        return;
    };
    let Some((walker, visited)) = panel.state_at(frame) else {
        return;
    };
    let visited_points: Vec<(f64, f64)> = visited
        .iter()
        .filter_map(|&v| sg.layout.get(v).map(|p| (p.x, p.y)))
        .collect();
    let unvisited_points: Vec<(f64, f64)> = sg
        .layout
        .iter()
        .enumerate()
        .filter(|(i, _)| !visited.contains(i))
        .map(|(_, p)| (p.x, p.y))
        .collect();

    let title = format!(" {} ({}/{}) ", panel.title(), visited.len(), sg.layout.len());
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds(BOUNDS)
        .y_bounds(BOUNDS)
        .paint(|ctx| {
            for &(u, v) in sg.graph.edges() {
                if let (Some(a), Some(b)) = (sg.layout.get(u), sg.layout.get(v)) {
                    ctx.draw(&Line::new(a.x, a.y, b.x, b.y, Color::DarkGray));
                }
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: &unvisited_points,
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &visited_points,
                color: Color::LightBlue,
            });
            if let Some(p) = sg.layout.get(walker) {
                ctx.layer();
                ctx.draw(&Circle {
                    x: p.x,
                    y: p.y,
                    radius: 0.05,
                    color: Color::Red,
                });
            }
        });
    f.render_widget(canvas, area);
}
