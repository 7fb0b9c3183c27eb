use cgmath::Point2;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Cache, Canvas, Path, Program};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Theme};

use crate::viewer::controls::PIXELS_PER_LINE;
use crate::viewer::{InputEvent, Listener, Viewer};
use crate::Message;

/// Height of the viewer surface in the workspace
const VIEWER_HEIGHT: f32 = 420.0;

/// Tessellated viewer geometry, rebuilt only after the view changed
pub struct SurfaceCache {
    cache: Cache,
    invalidations: u64,
}

impl SurfaceCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::new(),
            invalidations: 0,
        }
    }

    /// Drop the cached geometry so the next draw rebuilds it
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.invalidations += 1;
        log::trace!("Viewer surface invalidated ({})", self.invalidations);
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }
}

/// Canvas program drawing a viewer and forwarding its input
pub struct ViewerCanvas<'a> {
    pub viewer: &'a Viewer,
    pub surface: &'a SurfaceCache,
}

/// Pointer tracking owned by the canvas widget.
///
/// Positions are kept exactly as `CursorMoved` reports them. An enclosing
/// scrollable translates the `Cursor` but not the event, so mixing the two
/// would turn the scroll offset into a drag delta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub last_cursor: Option<Point>,
    /// Pressed before any cursor position was seen
    pub awaiting_origin: bool,
}

pub fn view<'a>(viewer: &'a Viewer, surface: &'a SurfaceCache) -> Element<'a, Message> {
    Canvas::new(ViewerCanvas { viewer, surface })
        .width(Length::Fill)
        .height(Length::Fixed(VIEWER_HEIGHT))
        .into()
}

fn to_point(position: Point) -> Point2<f32> {
    Point2::new(position.x, position.y)
}

impl<'a> Program<Message> for ViewerCanvas<'a> {
    type State = PointerState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.surface.cache.draw(renderer, bounds.size(), |frame| {
            let [r, g, b] = self.viewer.background();
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(r, g, b));

            // Far to near, so nearer faces paint over farther ones
            for triangle in self.viewer.triangles(bounds.width, bounds.height) {
                let [p0, p1, p2] = triangle.points;
                let path = Path::new(|builder| {
                    builder.move_to(Point::new(p0.x, p0.y));
                    builder.line_to(Point::new(p1.x, p1.y));
                    builder.line_to(Point::new(p2.x, p2.y));
                    builder.close();
                });
                let [r, g, b, a] = triangle.color;
                frame.fill(&path, Color::from_rgba(r, g, b, a));
            }
        });

        vec![geometry]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let input = match event {
            // Mouse wheel for zooming (browser convention: positive = away)
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => {
                let pixels = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => -y * PIXELS_PER_LINE,
                    mouse::ScrollDelta::Pixels { y, .. } => -y,
                };
                Some(InputEvent::Wheel(pixels))
            }

            // Mouse button press - start dragging from the last raw position
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) if cursor.is_over(bounds) => {
                match state.last_cursor {
                    Some(position) => Some(InputEvent::PointerDown(to_point(position))),
                    None => {
                        state.awaiting_origin = true;
                        None
                    }
                }
            }

            // Mouse button release - stop dragging, wherever the cursor is
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.awaiting_origin = false;
                self.viewer.is_dragging().then_some(InputEvent::PointerUp)
            }

            // Mouse move - remember it, rotate if dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                state.last_cursor = Some(position);
                if state.awaiting_origin {
                    state.awaiting_origin = false;
                    Some(InputEvent::PointerDown(to_point(position)))
                } else if self.viewer.is_dragging() {
                    Some(InputEvent::PointerMoved(to_point(position)))
                } else {
                    None
                }
            }

            _ => None,
        };

        if let Some(input) = input {
            return (canvas::event::Status::Captured, Some(Message::Viewer(input)));
        }

        // The container changed size since the last event
        if self.viewer.is_listening(Listener::Resize) && self.viewer.surface() != (bounds.width, bounds.height) {
            let resized = InputEvent::Resized {
                width: bounds.width,
                height: bounds.height,
            };
            return (canvas::event::Status::Ignored, Some(Message::Viewer(resized)));
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(&self, _state: &Self::State, bounds: Rectangle, cursor: Cursor) -> mouse::Interaction {
        if self.viewer.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
