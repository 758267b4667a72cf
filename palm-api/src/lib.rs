/* This file is part of the Palm FM client project - https://github.com/palm-fm/palm-client
*
*  Copyright (C) 2025-2026 Palm FM contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
// NOTE: The files under api/ are included into both the ::sync and ::unsync modules.
//       RcStr is defined by each module with the matching smart pointer variant, and
//       the included files must not carry their own `use` items.

#[cfg(feature = "sync")]
pub mod sync {
    use serde::{Deserialize, Serialize};
    use strum::{EnumString, IntoStaticStr, VariantArray};

    pub type RcStr = std::sync::Arc<str>;

    include!("api/common.rs");
    include!("api/reels.rs");
    include!("api/token.rs");
    include!("api/content.rs");
}

#[cfg(feature = "unsync")]
pub mod unsync {
    use serde::{Deserialize, Serialize};
    use strum::{EnumString, IntoStaticStr, VariantArray};

    pub type RcStr = std::rc::Rc<str>;

    include!("api/common.rs");
    include!("api/reels.rs");
    include!("api/token.rs");
    include!("api/content.rs");
}
