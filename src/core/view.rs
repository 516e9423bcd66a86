use crate::core::store::AppointmentStore;
use crate::domain::model::{Appointment, StatusFilter};

/// 顯示用排序：建立時間新到舊，相同時再依開始日期新到舊
pub fn sort_for_display(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.start_date.cmp(&a.start_date))
    });
}

pub fn project(store: &AppointmentStore, filter: StatusFilter) -> Vec<Appointment> {
    let mut items = store.filter(filter);
    sort_for_display(&mut items);
    items
}
