use eframe::egui::{self, Align, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    /// The central column: the graph canvas at its derived height, then a
    /// scrollable run of section anchor blocks. The canvas sits outside the
    /// scroll region so wheel input over it only drives the zoom, never the
    /// page. Navigation stores a pending section id; the matching block
    /// scrolls itself into view on the frame it renders.
    pub(in crate::app) fn draw_page(&mut self, ui: &mut Ui) {
        self.draw_graph(ui);
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let pending = self.pending_scroll.take();
                for index in 0..self.registry.sections.len() {
                    let section = &self.registry.sections[index];
                    let block = ui
                        .vertical(|ui| {
                            ui.separator();
                            ui.add_space(8.0);
                            ui.heading(&section.title);
                            ui.label(RichText::new(&section.summary).weak());
                            ui.add_space(24.0);
                        })
                        .response;

                    if pending.as_deref() == Some(section.id.as_str()) {
                        block.scroll_to_me(Some(Align::TOP));
                    }
                }
            });
    }
}
