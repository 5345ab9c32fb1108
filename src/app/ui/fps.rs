use eframe::egui::Context;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        const FPS_SAMPLE_WINDOW: usize = 180;

        let dt = ctx.input(|input| input.stable_dt);
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if !self.show_fps || self.fps_current <= f32::EPSILON {
            return None;
        }

        let average = if self.fps_samples.is_empty() {
            self.fps_current
        } else {
            self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32
        };

        Some(format!(
            "FPS {:.0} | avg {:.1} | {:.1} ms",
            self.fps_current, average,
            1000.0 / self.fps_current
        ))
    }
}
