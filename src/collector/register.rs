//
// Part of cnext
// Copyright (c) 2020 Sander in 't Veld
// License: MIT
//

use super::Context;
use crate::common::*;
use crate::symbol::{RegisterMemberInfo, RegisterSymbol};
use crate::value_type::c_type_name;

pub fn collect(
	declaration: &RegisterDeclaration,
	context: &Context,
) -> RegisterSymbol
{
	let members = declaration
		.members
		.iter()
		.map(|member| collect_member(member, context))
		.collect();
	RegisterSymbol {
		origin: context.origin(
			&declaration.name,
			&declaration.location,
			declaration.flags,
		),
		base_address: declaration.address.to_string(),
		members,
	}
}

fn collect_member(
	member: &RegisterMember,
	context: &Context,
) -> RegisterMemberInfo
{
	let type_name = &member.value_type.name;
	let (c_type, bitmap_type) = match context.find_bitmap(type_name)
	{
		Some((bitmap, backing_type)) =>
		{
			(c_type_name(backing_type), Some(bitmap))
		}
		None => (c_type_name(type_name), None),
	};
	RegisterMemberInfo {
		name: member.name.name.clone(),
		offset: member.offset.to_string(),
		c_type,
		access: member.access,
		bitmap_type,
	}
}
