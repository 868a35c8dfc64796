//! 预导入模块，方便使用

pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects};
pub use super::teachers::{ActiveModel as TeacherActiveModel, Entity as Teachers};
