/// Идентификация UseCase в логах: индекс, техническое имя, заголовок
pub trait UseCaseMetadata {
    /// "u501"
    const INDEX: &'static str;
    /// "upload_inventory_csv"
    const NAME: &'static str;
    /// Заголовок страницы клиента
    const TITLE: &'static str;

    fn full_name() -> String {
        format!("{}_{}", Self::INDEX, Self::NAME)
    }
}
