use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::Element;
use crate::event::{Event, Key, Modifiers, PointerButton};
use crate::focus::FocusState;
use crate::geometry::Geometry;
use crate::hit::{find_draggable_ancestor, hit_test, hit_test_any};

/// In-flight drag tracking for synthesized drag-and-drop events.
#[derive(Debug)]
struct DragTracking {
    source: String,
    started: bool,
    last_over: Option<String>,
}

/// Converts raw crossterm events into high-level document events.
///
/// A press on (or inside) a draggable element arms a drag candidate; the
/// first subsequent move promotes it to a live drag, after which moves
/// become `DragOver` and the release becomes `Drop` + `DragEnd`. Everything
/// else maps straight through to pointer/click/key events.
#[derive(Debug, Default)]
pub struct InputState {
    drag: Option<DragTracking>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a synthesized drag is currently live.
    pub fn dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.started)
    }

    /// Process raw crossterm events and produce high-level events.
    pub fn process_events(
        &mut self,
        raw: &[CrosstermEvent],
        root: &Element,
        geometry: &Geometry,
        focus: &FocusState,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    let key: Key = key_event.code.into();
                    let modifiers: Modifiers = key_event.modifiers.into();
                    events.push(Event::Key {
                        target: focus.focused().map(str::to_string),
                        key,
                        modifiers,
                    });
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let x = f64::from(mouse_event.column);
                    let y = f64::from(mouse_event.row);

                    match mouse_event.kind {
                        MouseEventKind::Down(button) => {
                            let button: PointerButton = button.into();
                            let any_target = hit_test_any(geometry, root, x, y);
                            events.push(Event::Click {
                                target: hit_test(geometry, root, x, y),
                                x,
                                y,
                                button,
                            });
                            events.push(Event::PointerDown {
                                target: any_target.clone(),
                                x,
                                y,
                                button,
                            });

                            // Arm a drag candidate when the press lands on
                            // (or inside) a draggable element.
                            if button == PointerButton::Left
                                && let Some(target) = any_target
                                && let Some(source) = find_draggable_ancestor(root, &target)
                            {
                                log::trace!("[input] drag candidate armed on {source}");
                                self.drag = Some(DragTracking {
                                    source,
                                    started: false,
                                    last_over: None,
                                });
                            }
                        }

                        MouseEventKind::Drag(_button) => {
                            if let Some(drag) = &mut self.drag {
                                if !drag.started {
                                    drag.started = true;
                                    events.push(Event::DragStart {
                                        target: drag.source.clone(),
                                    });
                                }
                                let over = hit_test_any(geometry, root, x, y);
                                if drag.last_over != over
                                    && let Some(left) = drag.last_over.take()
                                {
                                    events.push(Event::DragLeave { target: left });
                                }
                                drag.last_over = over.clone();
                                events.push(Event::DragOver { target: over, x, y });
                            } else {
                                events.push(Event::PointerMove { x, y });
                            }
                        }

                        MouseEventKind::Moved => {
                            events.push(Event::PointerMove { x, y });
                        }

                        MouseEventKind::Up(button) => {
                            if let Some(drag) = self.drag.take() {
                                if drag.started {
                                    events.push(Event::Drop {
                                        target: hit_test_any(geometry, root, x, y),
                                    });
                                    events.push(Event::DragEnd);
                                    continue;
                                }
                                // Armed but never moved: a plain press/release.
                            }
                            events.push(Event::PointerUp {
                                target: hit_test_any(geometry, root, x, y),
                                x,
                                y,
                                button: button.into(),
                            });
                        }

                        _ => {}
                    }
                }

                CrosstermEvent::FocusLost => {
                    if let Some(drag) = self.drag.take()
                        && drag.started
                    {
                        events.push(Event::DragEnd);
                    }
                    events.push(Event::WindowBlur);
                }

                _ => {}
            }
        }

        events
    }
}
