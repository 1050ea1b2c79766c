//! Compiled-in lookup tables. Not configurable by design of the tool's inputs.

/// Source category (as written in V1 declarations) → generated category.
pub const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Фундамент", "exterior"),
    ("Внутренняя отделка", "interior"),
    ("Наружная отделка", "exterior"),
    ("Инженерные работы", "interior"),
    ("Конструкции", "exterior"),
];

/// Category used when the source category is not in [`CATEGORY_MAP`].
pub const DEFAULT_CATEGORY: &str = "interior";

/// Source subcategory → generated subcategory slug.
pub const SUBCATEGORY_MAP: &[(&str, &str)] = &[
    ("Стены", "walls"),
    ("Полы", "flooring"),
    ("Потолки", "ceilings"),
    ("Фундамент", "foundation"),
    ("Кровля", "roofing"),
    ("Перегородки", "partitions"),
    ("Утепление", "insulation"),
    ("Ванная / туалет", "bathroom"),
    ("Окна / двери", "windows_doors"),
    ("Ровнители / смеси", "mix"),
    ("Фасад", "facade"),
];

/// Old category enum member → new one. Names not listed map to themselves,
/// and no target appears as a source, so a second pass changes nothing.
pub const CATEGORY_REMAP: &[(&str, &str)] = &[
    ("foundation", "exterior"),
    ("walls", "exterior"),
    ("roofing", "exterior"),
    ("flooring", "interior"),
    ("ceilings", "interior"),
    ("wallFinishing", "interior"),
    ("insulation", "exterior"),
    ("engineering", "interior"),
    ("windowsDoors", "interior"),
    ("facade", "exterior"),
    ("auxiliary", "exterior"),
    ("other", "interior"),
];

/// Curated values for short keys that show up across many calculators.
pub const CURATED_TRANSLATIONS: &[(&str, &str)] = &[
    // Calculator titles
    ("bathroomTile", "Плитка в ванной"),
    ("waterproofing", "Гидроизоляция"),
    ("electrics", "Электрика"),
    ("plumbing", "Сантехника"),
    ("heating", "Отопление"),
    ("ventilation", "Вентиляция"),
    ("siding", "Сайдинг"),
    ("facadePanels", "Фасадные панели"),
    ("woodFacade", "Деревянный фасад"),
    ("brickFacade", "Облицовочный кирпич"),
    ("wetFacade", "Мокрый фасад"),
    ("stripTitle", "Ленточный фундамент"),
    ("mineralInsulation", "Минеральная изоляция"),
    ("foamInsulation", "Пенная изоляция"),
    ("putty", "Шпаклевка"),
    ("primer", "Грунтовка"),
    ("tileGlue", "Плиточный клей"),
    ("plaster", "Штукатурка"),
    ("metalRoofing", "Металлическая кровля"),
    ("softRoofing", "Мягкая кровля"),
    ("gutters", "Водостоки"),
    ("stairs", "Лестница"),
    ("fence", "Забор"),
    ("blindArea", "Отмостка"),
    ("basement", "Подвал / Погреб"),
    ("balcony", "Балкон / Лоджия"),
    ("attic", "Мансарда"),
    ("terrace", "Терраса"),
    ("windowsInstall", "Установка окон"),
    ("doorsInstall", "Установка дверей"),
    ("slopesFinishing", "Отделка откосов"),
    // Input fields
    ("wallArea", "Площадь стен"),
    ("floorArea", "Площадь пола"),
    ("tileWidth", "Ширина плитки"),
    ("tileHeight", "Высота плитки"),
    ("wallHeight", "Высота стены"),
    ("cableLength", "Длина кабеля"),
    ("outletsCount", "Количество розеток"),
    ("switchesCount", "Количество выключателей"),
    ("pipeDiameter", "Диаметр трубы"),
    ("pipeLength", "Длина труб"),
    ("radiatorPower", "Мощность радиатора"),
    ("ductDiameter", "Диаметр воздуховода"),
    ("sidingWidth", "Ширина сайдинга"),
    ("sidingHeight", "Высота сайдинга"),
    ("panelWidth", "Ширина панели"),
    ("panelHeight", "Высота панели"),
    ("thickness", "Толщина"),
    ("insulationType", "Тип утепления"),
    ("foundationLength", "Длина фундамента"),
    ("foundationDepth", "Глубина фундамента"),
    ("foundationWidth", "Ширина фундамента"),
    ("stairsHeight", "Высота лестницы"),
    ("stepsCount", "Количество ступеней"),
    ("stepWidth", "Ширина ступени"),
    ("fenceHeight", "Высота забора"),
    ("postSpacing", "Расстояние между столбами"),
    ("windowWidth", "Ширина окна"),
    ("windowHeight", "Высота окна"),
    ("doorWidth", "Ширина двери"),
    ("doorHeight", "Высота двери"),
    ("slopeDepth", "Глубина откоса"),
    // Result labels
    ("totalArea", "Общая площадь"),
    ("tape", "Лента"),
    ("cable", "Кабель"),
    ("outlets", "Розетки"),
    ("switches", "Выключатели"),
    ("pipes", "Трубы"),
    ("fittings", "Фитинги"),
    ("radiators", "Радиаторы"),
    ("ducts", "Воздуховоды"),
    ("panels", "Панели"),
    ("profiles", "Профили"),
    ("fasteners", "Крепеж"),
    ("insulation", "Утеплитель"),
    ("membrane", "Мембрана"),
    ("posts", "Столбы"),
    ("boards", "Доски"),
    ("steps", "Ступени"),
    ("handrails", "Перила"),
    ("slopes", "Откосы"),
];

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Generated category for a source category, falling back to [`DEFAULT_CATEGORY`].
pub fn map_category(source: &str) -> &'static str {
    lookup(CATEGORY_MAP, source).unwrap_or(DEFAULT_CATEGORY)
}

/// Generated subcategory for a source subcategory, falling back to `module`.
pub fn map_subcategory<'a>(source: &str, module: &'a str) -> &'a str {
    lookup(SUBCATEGORY_MAP, source).unwrap_or(module)
}

/// New category name for an old one; unknown names are returned unchanged.
pub fn remap_category(old: &str) -> &str {
    lookup(CATEGORY_REMAP, old).unwrap_or(old)
}

pub fn curated_translation(short_key: &str) -> Option<&'static str> {
    lookup(CURATED_TRANSLATIONS, short_key)
}
